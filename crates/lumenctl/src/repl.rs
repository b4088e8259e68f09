//! Interactive chat loop.
//!
//! Reads user lines from stdin, drives the reply engine with the real
//! wall clock, and prints each exchange. The session title mirrors chat
//! tabs: first user message, truncated.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::Utc;
use lumen_common::{EngineConfig, Message};
use lumen_engine::ReplyEngine;
use owo_colors::OwoColorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

const TITLE_MAX_CHARS: usize = 30;

/// Session title derived from the first user message
fn session_title(first_message: &str) -> String {
    let mut title: String = first_message.chars().take(TITLE_MAX_CHARS).collect();
    if first_message.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}

pub async fn run(config: EngineConfig, seed: Option<u64>, plain: bool) -> Result<()> {
    let name = config.assistant_name.clone();
    let engine = ReplyEngine::new(config);
    let mut rng = match seed {
        Some(s) => {
            info!("Session RNG pinned to seed {}", s);
            StdRng::seed_from_u64(s)
        }
        None => StdRng::from_entropy(),
    };
    let mut history: Vec<Message> = Vec::new();

    if plain {
        println!("{} ready. Type a message, or 'exit' to quit.", name);
    } else {
        println!(
            "{} ready. Type a message, or 'exit' to quit.",
            name.bold().magenta()
        );
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if plain {
            print!("you> ");
        } else {
            print!("{} ", "you>".cyan());
        }
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "exit" || message == "quit" {
            break;
        }

        if history.is_empty() {
            let title = session_title(message);
            if plain {
                println!("[session: {}]", title);
            } else {
                println!("[session: {}]", title.dimmed());
            }
        }

        history.push(Message::user(message));

        let reply = engine
            .generate_reply(message, &history, Utc::now(), &mut rng)
            .await;

        if plain {
            println!("\n{}\n", reply);
        } else {
            println!("\n{}\n", reply.green());
        }

        history.push(Message::assistant(reply));
    }

    info!("Session ended after {} messages", history.len());
    Ok(())
}
