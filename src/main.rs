use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;

use xhs_copywriter::api::api_loop;
use xhs_copywriter::environment::AppConfig;
use xhs_copywriter::logging::{configure_logging, LogOutput};
use xhs_copywriter::note::{self, NoteAssembler, DEFAULT_MAX_LENGTH};
use xhs_copywriter::service::{
    NoteRequest, ReviewRequest, Services, DEFAULT_CATEGORY, DEFAULT_LENGTH_OPTION, DEFAULT_SCENE,
    DEFAULT_TAGS, DEFAULT_TONE,
};

/// Drafts Xiaohongshu notes and Meituan reviews through a chat-completion API
/// and relays finished notes to the publishing API.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Generate one note and print it as JSON
    Note {
        #[arg(long, default_value = DEFAULT_SCENE)]
        scene: String,
        #[arg(long, default_value = DEFAULT_TAGS)]
        tags: String,
    },
    /// Generate up to three reviews and print them as JSON
    Reviews {
        #[arg(long, default_value = DEFAULT_CATEGORY)]
        category: String,
        #[arg(long, default_value = DEFAULT_TONE)]
        tone: String,
        /// One of 50-80, 80-100, 100+
        #[arg(long, default_value = DEFAULT_LENGTH_OPTION)]
        length: String,
    },
    /// Normalize saved generator output into a note without calling the API
    Assemble {
        /// File holding raw generator output; stdin when omitted
        #[arg(short, long, value_name = "PATH")]
        input: Option<PathBuf>,
        #[arg(long, default_value = "")]
        tags: String,
        #[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
        max_length: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    });

    // Reads .env too, so RUST_LOG set there applies to logging.
    let mut config = AppConfig::from_env();

    let output = match command {
        Command::Serve { .. } => LogOutput::Stdout,
        _ => LogOutput::Stderr,
    };
    configure_logging(output);

    match command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            api_loop(config).await
        }
        Command::Note { scene, tags } => {
            let services = Services::from_config(&config)?;
            let note = services
                .generate_note(&NoteRequest { scene, tags })
                .await?;
            print_json(&note)
        }
        Command::Reviews {
            category,
            tone,
            length,
        } => {
            let services = Services::from_config(&config)?;
            let reviews = services
                .generate_reviews(&ReviewRequest {
                    category,
                    tone,
                    length_option: length,
                })
                .await?;
            print_json(&reviews)
        }
        Command::Assemble {
            input,
            tags,
            max_length,
        } => {
            let raw = read_input(input.as_ref())?;
            info!("Assembling note from {} characters of input", raw.chars().count());
            let assembler = NoteAssembler::new().with_max_length(max_length);
            let note = note::note_from_output(raw.trim(), &tags, &assembler);
            print_json(&note)
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stdin")?;
            Ok(raw)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
