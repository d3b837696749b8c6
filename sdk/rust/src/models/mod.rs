mod category;
mod chat;
mod download;
mod product;
mod quota;
mod user;

pub use category::*;
pub use chat::*;
pub use download::*;
pub use product::*;
pub use quota::*;
pub use user::*;
