use crate::adapter::GenerationAdapter;
use crate::constants::{
    CMD_ADD_PROMPT, CMD_CLOSE, CMD_ESCAPE, CMD_GENERATE, CMD_HELP, CMD_IMAGE, CMD_QUIT, CMD_RATIO,
    CMD_REFERENCE, CMD_REMOVE_IMAGE, CMD_REMOVE_PROMPT, CMD_SAVE, CMD_SET_PROMPT, CMD_SHOW, CMD_TOGGLE,
    CMD_UNREFERENCE, CMD_USE, CMD_VIEW,
};
use crate::error::{Result, VariatorError};
use crate::print_help::print_help;
use crate::store::{AppState, Effect, Key, Message};
use crate::types::FileHandle;
use crate::utils::{create_spinner, save_bytes};
use crate::view::render;
use colored::Colorize;
use std::path::PathBuf;
use tokio::io::{self, AsyncBufReadExt, BufReader};

#[derive(Debug, PartialEq)]
pub enum Command {
    Dispatch(Message),
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let message = match name {
        "" | CMD_SHOW => return Ok(Command::Show),
        CMD_HELP => return Ok(Command::Help),
        CMD_QUIT | "exit" => return Ok(Command::Quit),
        CMD_GENERATE => Message::Generate,
        CMD_CLOSE => Message::CloseViewer,
        CMD_ESCAPE => Message::KeyPressed(Key::Escape),
        CMD_VIEW => Message::OpenViewer(parse_index(rest)?),
        CMD_SAVE => Message::Download(parse_index(rest)?),
        CMD_USE => Message::UseAsInput(parse_index(rest)?),
        CMD_ADD_PROMPT if rest.is_empty() => Message::AddPrompt,
        CMD_ADD_PROMPT => {
            return Err(VariatorError::InvalidCommand(
                "add takes no arguments; use set N <text>".into(),
            ))
        }
        CMD_REMOVE_PROMPT => Message::RemovePrompt(parse_index(rest)?),
        CMD_SET_PROMPT => {
            let (index, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Message::UpdatePrompt(parse_index(index)?, text.trim().to_string())
        }
        CMD_TOGGLE => Message::ToggleOption(rest.parse().map_err(VariatorError::InvalidCommand)?),
        CMD_RATIO => Message::SetAspectRatio(rest.parse().map_err(VariatorError::InvalidCommand)?),
        CMD_IMAGE => Message::SelectBaseImage(FileHandle::open(require_path(rest)?)?),
        CMD_REMOVE_IMAGE => Message::RemoveBaseImage,
        CMD_REFERENCE => Message::AddReferenceImage(FileHandle::open(require_path(rest)?)?),
        CMD_UNREFERENCE => Message::RemoveReferenceImage(parse_index(rest)?),
        other => {
            return Err(VariatorError::InvalidCommand(format!(
                "unknown command '{}', try help",
                other
            )))
        }
    };
    Ok(Command::Dispatch(message))
}

fn parse_index(arg: &str) -> Result<usize> {
    arg.parse()
        .map_err(|_| VariatorError::InvalidCommand(format!("expected an index, got '{}'", arg)))
}

fn require_path(arg: &str) -> Result<&str> {
    if arg.is_empty() {
        Err(VariatorError::InvalidCommand("expected a file path".into()))
    } else {
        Ok(arg)
    }
}

/// Outcome of saving a whole batch. A failed write does not stop the others.
#[derive(Debug, Default)]
pub struct SaveReport {
    pub saved: Vec<PathBuf>,
    pub failed: Vec<(usize, VariatorError)>,
}

/// Owns the store and performs the effects its `update` asks for.
pub struct Session {
    state: AppState,
    adapter: GenerationAdapter,
    out_dir: PathBuf,
}

impl Session {
    pub fn new(adapter: GenerationAdapter, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            state: AppState::new(),
            adapter,
            out_dir: out_dir.into(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns the path of any file written by the message.
    pub async fn dispatch(&mut self, message: Message) -> Result<Option<PathBuf>> {
        let effect = self.state.update(message);
        self.perform(effect).await
    }

    async fn perform(&mut self, effect: Effect) -> Result<Option<PathBuf>> {
        match effect {
            Effect::None => Ok(None),
            Effect::Generate(job) => {
                let spinner = create_spinner("cyan", "Generating images...".to_string());
                let results = self
                    .adapter
                    .generate_image_variations(
                        job.base_image.as_ref(),
                        &job.prompts,
                        &job.reference_images,
                        job.aspect_ratio.as_str(),
                    )
                    .await;
                spinner.finish_and_clear();
                let failed = results.iter().filter(|result| result.is_error()).count();
                log::info!("Batch finished: {} ok, {} failed", results.len() - failed, failed);
                self.state.update(Message::GenerationFinished(results));
                Ok(None)
            }
            Effect::Save(request) => {
                let path = save_bytes(&self.out_dir, &request.file_name, &request.bytes)?;
                log::info!("Saved {}", path.display());
                Ok(Some(path))
            }
        }
    }

    /// Downloads every successful result.
    pub async fn save_all(&mut self) -> SaveReport {
        let mut report = SaveReport::default();
        for index in 0..self.state.results().len() {
            match self.dispatch(Message::Download(index)).await {
                Ok(Some(path)) => report.saved.push(path),
                Ok(None) => {}
                Err(e) => {
                    log::error!("Could not save result {}: {}", index, e);
                    report.failed.push((index, e));
                }
            }
        }
        report
    }

    pub async fn run_interactive(&mut self) -> Result<()> {
        println!("{}", render(&self.state));
        let mut lines = BufReader::new(io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(e) => {
                    eprintln!("{}", e.to_string().red());
                    continue;
                }
            };
            match command {
                Command::Quit => break,
                Command::Help => print_help(),
                Command::Show => println!("{}", render(&self.state)),
                Command::Dispatch(message) => match self.dispatch(message).await {
                    Ok(Some(path)) => println!("Saved {}", path.display()),
                    Ok(None) => println!("{}", render(&self.state)),
                    Err(e) => eprintln!("{}", e.to_string().red()),
                },
            }
        }
        Ok(())
    }
}
