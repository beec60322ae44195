pub mod api;
pub mod assembler;
pub mod attachment;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod session;
pub mod ui;

pub use assembler::{assemble_user_message, UserInput};
pub use controller::{ControllerState, SessionContext, SessionController};
pub use error::{ChatError, Result};
