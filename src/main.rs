mod adapter;
mod composer;
mod config;
mod constants;
mod error;
mod gemini;
mod imagen;
mod preview;
mod print_help;
mod session;
mod store;
mod types;
mod utils;
mod view;

use crate::adapter::GenerationAdapter;
use crate::config::Config;
use crate::error::Result;
use crate::session::Session;
use crate::store::Message;
use crate::types::{AspectRatio, FileHandle, PromptOption};
use crate::view::{render, render_header};
use clap::Parser;
use colored::Colorize;
use std::{error::Error, path::PathBuf, time::Duration};

/// Generate AI variations of an ad image, or new images from text prompts.
#[derive(Debug, Parser)]
#[command(name = "variator", version)]
struct Cli {
    /// Prompt to generate from; repeat for several variations
    #[arg(short, long = "prompt")]
    prompts: Vec<String>,

    /// Base image to create variations of (PNG, JPEG or WebP)
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Extra style or content reference; needs --image
    #[arg(short, long = "reference")]
    references: Vec<PathBuf>,

    /// Output aspect ratio for text-to-image generation
    #[arg(short, long, default_value = "1:1")]
    aspect_ratio: AspectRatio,

    /// Append "with a thin border around the image" to every prompt
    #[arg(long)]
    thin_border: bool,

    /// Append "isolated on transparent background." to every prompt
    #[arg(long)]
    transparent_bg: bool,

    /// Append "cute simple Flat 2D style" to every prompt
    #[arg(long)]
    cute: bool,

    /// Append "vector in icon style" to every prompt
    #[arg(long)]
    vector: bool,

    /// Directory generated images are saved to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Keep a command prompt open after the first batch
    #[arg(long)]
    interactive: bool,
}

impl Cli {
    /// Translates the arguments into the messages the form would emit.
    fn initial_messages(&self) -> Result<Vec<Message>> {
        let mut messages = Vec::new();
        if let Some(path) = &self.image {
            messages.push(Message::SelectBaseImage(FileHandle::open(path)?));
        }
        for path in &self.references {
            messages.push(Message::AddReferenceImage(FileHandle::open(path)?));
        }
        for (index, prompt) in self.prompts.iter().enumerate() {
            if index > 0 {
                messages.push(Message::AddPrompt);
            }
            messages.push(Message::UpdatePrompt(index, prompt.clone()));
        }
        let toggles = [
            (self.thin_border, PromptOption::ThinBorder),
            (self.transparent_bg, PromptOption::TransparentBackground),
            (self.cute, PromptOption::CuteStyle),
            (self.vector, PromptOption::VectorStyle),
        ];
        for (enabled, option) in toggles {
            if enabled {
                messages.push(Message::ToggleOption(option));
            }
        }
        messages.push(Message::SetAspectRatio(self.aspect_ratio));
        Ok(messages)
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .build()?;
    let mut session = Session::new(GenerationAdapter::new(client, &config), &cli.out_dir);

    print!("{}", render_header());
    for message in cli.initial_messages()? {
        session.dispatch(message).await?;
    }

    if !cli.interactive || session.state().can_generate() {
        session.dispatch(Message::Generate).await?;
        println!("{}", render(session.state()));
    }

    if cli.interactive {
        return Ok(session.run_interactive().await?);
    }
    if let Some(error) = session.state().error() {
        return Err(error.to_string().into());
    }

    let report = session.save_all().await;
    for path in &report.saved {
        println!("{} {}", "Saved".green(), path.display());
    }
    for (index, e) in &report.failed {
        eprintln!("{} {}: {}", "Not saved".red(), index, e);
    }
    if !report.failed.is_empty() {
        return Err(format!("{} image(s) could not be saved", report.failed.len()).into());
    }
    Ok(())
}
