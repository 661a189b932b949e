//! Line-oriented terminal front end
//!
//! Reads one line at a time and awaits each store operation before reading
//! the next, so no message can be submitted while a request is in flight.

mod command;
mod render;

use crate::store::ChatStore;
use crate::transport::Transport;
use command::Command;
use crossterm::style::Stylize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Run the interactive loop until `/quit` or end of input
pub async fn run<T: Transport>(store: &ChatStore<T>, title: &str) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", title.bold());
    println!("Type /help for commands.");

    loop {
        print!("{} ", ">".dim());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        store.set_user_input(&line);

        let parsed = Command::parse(&line);
        if !matches!(parsed, Command::Empty) {
            store.set_user_input("");
        }

        match parsed {
            Command::Empty => {}
            Command::Quit => break,
            Command::Help => println!("{}", command::HELP),
            Command::Send(text) => send(store, &text).await,
            Command::New => {
                store.start_new_conversation();
                println!("{}", "Started a new conversation".dim());
            }
            Command::Load(id) => load(store, &id).await,
            Command::List => list(store).await,
            Command::History => print_transcript(store),
            Command::MissingArgument(usage) => println!("Usage: {usage}"),
            Command::Unknown(input) => println!("Unknown command: {input} (try /help)"),
        }
    }

    println!("Goodbye!");
    Ok(())
}

async fn send<T: Transport>(store: &ChatStore<T>, text: &str) {
    let already_shown = store.state().messages.len() + 1;
    println!("{}", "Thinking...".dim());

    if let Err(e) = store.send_message(text).await {
        println!("{}", e.to_string().yellow());
        return;
    }

    // The transcript may have been replaced meanwhile; never index past it
    let state = store.state();
    for message in state.messages.iter().skip(already_shown) {
        println!("{}", render::message_line(message));
    }
}

async fn load<T: Transport>(store: &ChatStore<T>, conversation_id: &str) {
    if let Err(e) = store.load_conversation(conversation_id).await {
        println!("{}", e.to_string().yellow());
        return;
    }

    let state = store.state();
    if state.current_conversation_id.as_deref() == Some(conversation_id) {
        println!("{}", format!("Loaded conversation {conversation_id}").dim());
        print_transcript(store);
    } else {
        println!("{}", format!("Could not load conversation {conversation_id}").yellow());
    }
}

async fn list<T: Transport>(store: &ChatStore<T>) {
    if let Err(e) = store.refresh_conversations().await {
        println!("{}", e.to_string().yellow());
        return;
    }

    let state = store.state();
    let lines = render::conversation_list(
        &state.conversations,
        state.current_conversation_id.as_deref(),
        &chrono::Local::now(),
    );
    for line in lines {
        println!("{line}");
    }
}

fn print_transcript<T: Transport>(store: &ChatStore<T>) {
    let state = store.state();
    if state.messages.is_empty() {
        println!("{}", "No messages yet".dim());
    }
    for message in &state.messages {
        println!("{}", render::message_line(message));
    }
}
