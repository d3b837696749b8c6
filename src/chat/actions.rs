//! Quick-action buttons: most send a canned prompt, a few are handled
//! without a round trip.

use std::str::FromStr;

use strum::{AsRefStr, EnumString};
use xeriwo_sdk::{QuickAction, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    ShowThemes,
    ShowPlugins,
    ShowFeatured,
    ShowStats,
    ShowLatest,
    Help,
    Login,
    Register,
}

impl ActionKind {
    pub fn prompt(&self) -> &'static str {
        match self {
            ActionKind::ShowThemes => "Show WordPress themes",
            ActionKind::ShowPlugins => "Show WordPress plugins",
            ActionKind::ShowFeatured => "Show featured products",
            ActionKind::ShowStats => "Show my download statistics",
            ActionKind::ShowLatest => "Show latest products",
            ActionKind::Help => "I need help",
            ActionKind::Login => "Login",
            ActionKind::Register => "Register",
        }
    }

    pub fn button(&self, text: &str) -> QuickAction {
        QuickAction::new(text, self.as_ref())
    }
}

/// What pressing a quick action does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Send(String),
    ShowStats,
    Navigate(View),
}

pub fn resolve(action: &str) -> Resolved {
    match ActionKind::from_str(action) {
        Ok(ActionKind::ShowStats) => Resolved::ShowStats,
        Ok(ActionKind::Login) => Resolved::Navigate(View::Login),
        Ok(ActionKind::Register) => Resolved::Navigate(View::Register),
        Ok(kind) => Resolved::Send(kind.prompt().to_string()),
        Err(_) => Resolved::Send(action.to_string()),
    }
}
