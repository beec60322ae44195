use crate::models::{registry, ContentPart, Message, MessageContent, Role, SessionMap};
use colored::*;

/// Print a status line to stderr, dimmed
pub fn display_status(status: &str) {
    eprintln!("{}", format!("[deepchat] {}", status).dimmed());
}

pub fn display_error(error: &dyn std::fmt::Display) {
    eprintln!("{} {}", "Error:".red(), error);
}

/// Display the assistant's reply
pub fn display_reply(reply: &str) {
    println!("{}", reply.trim_end());
}

pub fn display_models(current_id: &str) {
    for (label, id) in registry::MODELS {
        let marker = if *id == current_id { "*" } else { " " };
        println!("{} {} {}", marker.green(), label.bold(), format!("({})", id).dimmed());
    }
}

pub fn display_sessions(sessions: &SessionMap, current: Option<&str>) {
    if sessions.is_empty() {
        println!("{}", "No stored chats.".dimmed());
        return;
    }

    for session in sessions.iter() {
        let marker = if Some(session.id.as_str()) == current { "*" } else { " " };
        let preview = session
            .messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| summarize(&m.text(), 60))
            .unwrap_or_default();
        println!(
            "{} {} {} {}",
            marker.green(),
            session.id.cyan(),
            format!("[{} messages]", session.messages.len()).dimmed(),
            preview
        );
    }
}

pub fn display_history(messages: &[Message]) {
    for message in messages {
        let label = match message.role {
            Role::User => "you".green().bold(),
            Role::Assistant => "assistant".cyan().bold(),
            Role::System => "system".yellow().bold(),
        };
        println!("{}", label);
        println!("{}", message.text());

        if let MessageContent::Parts(parts) = &message.content {
            for part in parts {
                match part {
                    ContentPart::Image { image_url } => {
                        println!("{}", format!("<image {}>", image_url.url.mime_type()).dimmed())
                    }
                    ContentPart::Video { video_url } => {
                        println!("{}", format!("<video {}>", video_url.url.mime_type()).dimmed())
                    }
                    ContentPart::Text { .. } => {}
                }
            }
        }
        println!();
    }
}

fn summarize(text: &str, max_chars: usize) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > max_chars {
        format!("{}...", line.chars().take(max_chars).collect::<String>())
    } else {
        line.to_string()
    }
}
