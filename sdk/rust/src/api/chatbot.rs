use serde::Deserialize;

use crate::client::{Auth, Client};
use crate::error::Result;
use crate::models::{BotReply, ChatRequest};

#[derive(Deserialize)]
struct ChatBody {
    #[serde(default)]
    response: BotReply,
}

impl Client {
    /// `POST /chatbot/chat`
    pub async fn chat(&self, request: &ChatRequest) -> Result<Option<BotReply>> {
        let body: Option<ChatBody> = self.post("/chatbot/chat", Auth::User, request).await?;
        Ok(body.map(|b| b.response))
    }
}
