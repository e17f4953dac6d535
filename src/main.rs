use anyhow::{bail, Result};
use bangla_speller::app::{App, MediaOutcome};
use bangla_speller::keyboard::{self, Key, WordBuffer};
use bangla_speller::models::Config;
use bangla_speller::settings::Settings;
use bangla_speller::status::StatusMessage;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "bangla-speller")]
#[command(about = "Pictures and pronunciation for Bengali words")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a picture for a word.
    Image {
        word: String,
        /// Directory the picture is saved to (defaults to OUTPUT_DIR).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Pronounce a word.
    Speak {
        word: String,
        /// Also save the audio into this directory.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        #[arg(long)]
        no_play: bool,
    },
    /// Print the keyboard, or compose a word from key labels.
    Keyboard {
        #[arg(value_name = "KEY")]
        keys: Vec<String>,
    },
    /// Inspect or change the stored settings.
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

#[derive(Debug, Subcommand)]
enum SettingsCommand {
    Show,
    SetKey {
        key: String,
    },
    ClearKey,
    Theme {
        #[arg(long)]
        primary: Option<String>,
        #[arg(long)]
        bg: Option<String>,
        #[arg(long)]
        blur: Option<u32>,
    },
}

fn report(status: Option<StatusMessage>) {
    if let Some(status) = status {
        if status.is_error() {
            eprintln!("{}", status);
        } else {
            println!("{}", status);
        }
    }
}

fn compose(keys: &[String]) -> Result<String> {
    let mut buffer = WordBuffer::new();
    for label in keys {
        match Key::from_label(label) {
            Some(key) => buffer.press(key),
            None => bail!("Unknown key '{}'", label),
        }
    }
    Ok(buffer.as_str().to_string())
}

fn print_keyboard() {
    for row in keyboard::rows() {
        let labels: Vec<&str> = row.into_iter().map(Key::label).collect();
        println!("{}", labels.join(" "));
    }
}

/// Hides all but the last four characters of the key.
fn masked(settings: &Settings) -> Settings {
    let mut shown = settings.clone();
    if let Some(key) = settings.api_key() {
        let chars: Vec<char> = key.chars().collect();
        let visible: String = chars[chars.len().saturating_sub(4)..].iter().collect();
        shown.api_key = Some(format!("****{}", visible));
    }
    shown
}

fn save_outcome(outcome: &MediaOutcome, dir: &Path, stem: &str) -> Result<Option<PathBuf>> {
    match &outcome.resource {
        Some(resource) => {
            let path = resource.save(dir, stem)?;
            info!("Saved {} to {}", resource.mime_type, path.display());
            Ok(Some(path))
        }
        None => Ok(None),
    }
}

async fn run(app: &App, config: &Config, command: Command) -> Result<bool> {
    match command {
        Command::Image { word, out } => {
            report(Some(StatusMessage::GeneratingImage));
            let outcome = app.generate_image(&word).await;
            report(outcome.status);

            let dir = out.unwrap_or_else(|| config.output_dir.clone());
            if let Some(path) = save_outcome(&outcome, &dir, "image")? {
                println!("{}", path.display());
            }
            Ok(outcome.resource.is_some())
        }
        Command::Speak { word, out, no_play } => {
            report(Some(StatusMessage::Synthesizing));
            let outcome = app.speak(&word).await;
            report(outcome.status);

            let Some(resource) = &outcome.resource else {
                return Ok(false);
            };

            if let Some(dir) = out {
                if let Some(path) = save_outcome(&outcome, &dir, "speech")? {
                    println!("{}", path.display());
                }
            }

            if !no_play {
                report(Some(StatusMessage::Reading));
                if let Err(e) = app.play(resource).await {
                    error!("Playback failed: {}", e);
                    report(Some(StatusMessage::PlaybackFailed));
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Command::Keyboard { keys } => {
            if keys.is_empty() {
                print_keyboard();
            } else {
                println!("{}", compose(&keys)?);
            }
            Ok(true)
        }
        Command::Settings { action } => {
            let store = app.settings();
            match action {
                SettingsCommand::Show => {
                    println!("{}", serde_json::to_string_pretty(&masked(&store.load()))?);
                }
                SettingsCommand::SetKey { key } => {
                    let mut settings = store.load();
                    settings.api_key = Some(key.trim().to_string());
                    store.save(&settings)?;
                    info!("API key saved");
                }
                SettingsCommand::ClearKey => {
                    store.clear_api_key()?;
                    info!("API key cleared");
                }
                SettingsCommand::Theme { primary, bg, blur } => {
                    let mut settings = store.load();
                    if primary.is_some() {
                        settings.primary = primary;
                    }
                    if bg.is_some() {
                        settings.bg = bg;
                    }
                    if blur.is_some() {
                        settings.blur = blur;
                    }
                    store.save(&settings)?;
                    info!(
                        "Theme saved (primary: {}, bg: {}, blur: {})",
                        settings.primary_color(),
                        settings.background_color(),
                        settings.blur()
                    );
                }
            }
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bangla_speller=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let app = App::new(&config);

    match run(&app, &config, args.command).await {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
