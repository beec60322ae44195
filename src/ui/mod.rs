pub mod output;

pub use output::{
    display_error, display_history, display_models, display_reply, display_sessions,
    display_status,
};
