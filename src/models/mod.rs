pub mod registry;
mod session;

pub use session::{
    ContentPart, DataUri, MediaUrl, Message, MessageContent, Role, Session, SessionMap,
};
