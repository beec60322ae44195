pub mod client;
pub mod models;
pub mod response;

pub use client::{CompletionBackend, CompletionClient};
pub use models::RequestBody;
