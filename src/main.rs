use clap::Parser;
use colored::*;
use std::process;
use tokio_util::sync::CancellationToken;

use deepchat::api::CompletionClient;
use deepchat::cli::Args;
use deepchat::config::Config;
use deepchat::session::{FilesystemSessionStore, SessionStore};
use deepchat::ui::{
    display_error, display_history, display_models, display_reply, display_sessions,
    display_status,
};
use deepchat::{ChatError, Result, SessionController, UserInput};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        display_error(&e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = Config::from_env_and_args(&args)?;

    let default_filter = if config.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if args.list_models {
        display_models(&config.model_id);
        return Ok(());
    }

    let store =
        FilesystemSessionStore::new(&config.chats_file).with_max_messages(config.max_messages);

    if args.list_sessions {
        let sessions = store.load()?;
        let current = sessions.first().map(|s| s.id.clone());
        display_sessions(&sessions, current.as_deref());
        return Ok(());
    }

    // The key is only checked once a request is about to go out
    let client = CompletionClient::new(
        config.api_key.as_deref().unwrap_or_default(),
        config.api_endpoint.clone(),
    )?;
    let mut controller = SessionController::new(store, client)
        .with_system_prompt(config.system_prompt.clone())
        .with_max_file_chars(config.max_file_chars);

    let ctx = if args.new_conversation {
        controller.start_new_session()?
    } else if let Some(session_id) = &args.session {
        controller.open_session(session_id)?
    } else {
        controller.resume_or_start()?
    };

    if args.show_history {
        display_history(&controller.history(&ctx)?);
        return Ok(());
    }

    let text = args.message_text();
    if text.is_none() && !args.has_attachments() {
        if args.new_conversation {
            println!("{} {}", "Started new chat".green(), ctx.session_id().cyan());
            return Ok(());
        }
        print_usage();
        process::exit(1);
    }

    config.require_api_key()?;

    let input = UserInput {
        text,
        file: args.file.clone(),
        image: args.image.clone(),
        video: args.video.clone(),
    };

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    if config.verbose {
        display_status(&format!(
            "session {} | model {} ({})",
            ctx.session_id(),
            config.model_label,
            config.model_id
        ));
    }

    match controller
        .send_turn(&ctx, &config.model_id, &input, &cancel)
        .await
    {
        Ok(reply) => {
            display_reply(&reply);
            Ok(())
        }
        Err(ChatError::Cancelled) => {
            display_status("cancelled; your message was kept in the chat history");
            process::exit(130);
        }
        Err(e) if e.is_remote() => {
            display_status("your message was kept in the chat history");
            Err(e)
        }
        Err(e) => Err(e),
    }
}

fn print_usage() {
    eprintln!("{}", "Usage: deepchat [OPTIONS] <message>...".yellow());
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  deepchat explain borrow checking");
    eprintln!("  deepchat --image photo.jpg -m \"Gemma 3 27B Vision\" what is in this picture");
    eprintln!("  deepchat --file notes.md summarize this");
    eprintln!("  deepchat --new");
    eprintln!("  deepchat --list-sessions");
    eprintln!();
    eprintln!("Run with --help for every option.");
}
