//! Interactive chat session.
//!
//! One loop multiplexes two sources: lines typed into a blocking rustyline
//! thread, and events from the live channel of the currently open room. The
//! event stream is swapped out whenever the page opens a new channel.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use crate::domain::ChannelEvent;

use super::{page::ChatPage, page::PageOutput, ui::redisplay_prompt};

const HELP_TEXT: &str = "\
Commands:
  /rooms          refresh and show your conversations
  /open <id>      open a conversation
  /new <email>    start a conversation with a user
  /close          leave the current conversation
  /help           show this help
  /quit           exit
Anything else is sent as a message to the open conversation.
";

/// Run the interactive session until the user quits
pub async fn run_client_session(
    mut page: ChatPage,
    user_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "\nYou are '{}'. Type /help for commands. Press Ctrl+C to exit.\n",
        user_id
    );

    // Spawn a blocking thread for rustyline (synchronous readline)
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let prompt = format!("{}> ", user_id);
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                    }
                    if input_tx.send(line.to_string()).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Event stream of the open room's channel, if any
    let mut events: Option<mpsc::UnboundedReceiver<ChannelEvent>> = None;

    let output = page.refresh_directory().await;
    print_output(output, &mut events, user_id);

    loop {
        tokio::select! {
            line = input_rx.recv() => {
                let Some(line) = line else {
                    // Readline thread exited (Ctrl+C / Ctrl+D)
                    break;
                };
                if line.is_empty() {
                    continue;
                }
                if line == "/quit" {
                    break;
                }
                let output = dispatch(&mut page, &line).await;
                print_output(output, &mut events, user_id);
            }
            event = next_event(&mut events) => {
                match event {
                    Some(event) => {
                        let output = page.handle_event(event).await;
                        println!();
                        print_output(output, &mut events, user_id);
                    }
                    None => {
                        // Stream ended without a close event: the channel was
                        // torn down locally, nothing to announce
                        events = None;
                    }
                }
            }
        }
    }

    page.close_room().await;
    tracing::info!("Client session ended");
    Ok(())
}

/// Await the next channel event, or park forever while no channel is open
async fn next_event(
    events: &mut Option<mpsc::UnboundedReceiver<ChannelEvent>>,
) -> Option<ChannelEvent> {
    match events.as_mut() {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

async fn dispatch(page: &mut ChatPage, line: &str) -> PageOutput {
    if let Some(command) = line.strip_prefix('/') {
        let (name, argument) = match command.split_once(' ') {
            Some((name, argument)) => (name, argument.trim()),
            None => (command, ""),
        };
        match name {
            "rooms" => page.refresh_directory().await,
            "open" => page.open_room(argument).await,
            "new" => page.create_room(argument).await,
            "close" => page.close_room().await,
            "help" => {
                print!("{}", HELP_TEXT);
                page.render()
            }
            _ => {
                println!("Unknown command '/{}'. Type /help.", name);
                page.render()
            }
        }
    } else {
        page.submit_draft(line).await
    }
}

fn print_output(
    output: PageOutput,
    events: &mut Option<mpsc::UnboundedReceiver<ChannelEvent>>,
    user_id: &str,
) {
    for block in &output.blocks {
        print!("{}", block);
    }
    if output.events.is_some() {
        *events = output.events;
    }
    if !output.blocks.is_empty() {
        redisplay_prompt(user_id);
    }
}
