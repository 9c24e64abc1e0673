use colored::Colorize;
use excerpt::api::{CmdMessage, MessageLevel};

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_config(entries: &[(&str, String)]) {
    if entries.is_empty() {
        println!("No configuration values.");
        return;
    }
    let key_width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in entries {
        let padded = format!("{:<width$}", key, width = key_width);
        println!("{} = {}", padded.bold(), value);
    }
}
