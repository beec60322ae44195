use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "deepchat")]
#[command(about = "Chat with OpenRouter models, keeping every conversation on disk", long_about = None)]
pub struct Args {
    #[arg(short = 'n', long = "new", help = "Start a new chat")]
    pub new_conversation: bool,

    #[arg(
        short = 's',
        long = "session",
        value_name = "ID",
        help = "Continue the chat with this id instead of the first stored one"
    )]
    pub session: Option<String>,

    #[arg(
        short = 'm',
        long = "model",
        value_name = "LABEL",
        help = "Model label (see --list-models) or model id"
    )]
    pub model: Option<String>,

    #[arg(short = 'f', long = "file", help = "Attach a text file (excerpted)")]
    pub file: Option<PathBuf>,

    #[arg(short = 'i', long = "image", help = "Attach an image")]
    pub image: Option<PathBuf>,

    #[arg(long = "video", help = "Attach a video")]
    pub video: Option<PathBuf>,

    #[arg(long = "list-models", help = "List the available models and exit")]
    pub list_models: bool,

    #[arg(long = "list-sessions", help = "List stored chats and exit")]
    pub list_sessions: bool,

    #[arg(long = "history", help = "Print the selected chat's history and exit")]
    pub show_history: bool,

    #[arg(
        long = "chats-file",
        value_name = "PATH",
        help = "Where chats are stored (default: data dir/deepchat/chats.json)"
    )]
    pub chats_file: Option<PathBuf>,

    #[arg(
        long = "api-endpoint",
        help = "Custom API base URL (e.g., http://localhost:11434/v1)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(short = 'v', long = "verbose", help = "Log requests and storage activity")]
    pub verbose: bool,

    #[arg(help = "Message to send")]
    pub command: Vec<String>,
}

impl Args {
    pub fn message_text(&self) -> Option<String> {
        let text = self.command.join(" ");
        (!text.trim().is_empty()).then_some(text)
    }

    pub fn has_attachments(&self) -> bool {
        self.file.is_some() || self.image.is_some() || self.video.is_some()
    }
}
