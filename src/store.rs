//! Application state and the single `update` dispatcher that mutates it.
//!
//! `update` never touches the network or the filesystem. Work that has to
//! leave the store comes back as an `Effect` for the driver to perform.

use crate::composer::{compose_prompts, has_usable_prompt};
use crate::constants::MSG_NO_PROMPT;
use crate::error::VariatorError;
use crate::preview::PreviewRegistry;
use crate::types::{
    AspectRatio, FileHandle, GeneratedImage, ImageFile, PromptOption, PromptOptions,
};
use crate::utils::download_file_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    SelectBaseImage(FileHandle),
    RemoveBaseImage,
    AddReferenceImage(FileHandle),
    RemoveReferenceImage(usize),
    AddPrompt,
    RemovePrompt(usize),
    UpdatePrompt(usize, String),
    ToggleOption(PromptOption),
    SetAspectRatio(AspectRatio),
    Generate,
    GenerationFinished(Vec<GeneratedImage>),
    OpenViewer(usize),
    CloseViewer,
    KeyPressed(Key),
    Download(usize),
    UseAsInput(usize),
}

/// Everything the adapter needs for one batch, detached from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationJob {
    pub base_image: Option<FileHandle>,
    pub prompts: Vec<String>,
    pub reference_images: Vec<FileHandle>,
    pub aspect_ratio: AspectRatio,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Generate(GenerationJob),
    Save(SaveRequest),
}

#[derive(Debug)]
pub struct AppState {
    base_image: Option<ImageFile>,
    reference_images: Vec<ImageFile>,
    prompts: Vec<String>,
    options: PromptOptions,
    aspect_ratio: AspectRatio,
    results: Vec<GeneratedImage>,
    is_loading: bool,
    error: Option<String>,
    fullscreen: Option<usize>,
    previews: PreviewRegistry,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            base_image: None,
            reference_images: Vec::new(),
            prompts: vec![String::new()],
            options: PromptOptions::default(),
            aspect_ratio: AspectRatio::default(),
            results: Vec::new(),
            is_loading: false,
            error: None,
            fullscreen: None,
            previews: PreviewRegistry::new(),
        }
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::SelectBaseImage(file) => {
                self.select_base_image(file);
                Effect::None
            }
            Message::RemoveBaseImage => {
                if let Some(old) = self.base_image.take() {
                    self.previews.revoke(&old.preview_url);
                }
                for reference in self.reference_images.drain(..) {
                    self.previews.revoke(&reference.preview_url);
                }
                Effect::None
            }
            Message::AddReferenceImage(file) => {
                if self.base_image.is_none() {
                    log::warn!("Reference image {} ignored without a base image", file.name);
                    return Effect::None;
                }
                let preview_url = self.previews.create(&file.name);
                self.reference_images.push(ImageFile { file, preview_url });
                Effect::None
            }
            Message::RemoveReferenceImage(index) => {
                if index < self.reference_images.len() {
                    let removed = self.reference_images.remove(index);
                    self.previews.revoke(&removed.preview_url);
                }
                Effect::None
            }
            Message::AddPrompt => {
                self.prompts.push(String::new());
                Effect::None
            }
            Message::RemovePrompt(index) => {
                if index < self.prompts.len() {
                    if self.prompts.len() == 1 {
                        self.prompts[0].clear();
                    } else {
                        self.prompts.remove(index);
                    }
                }
                Effect::None
            }
            Message::UpdatePrompt(index, value) => {
                if let Some(prompt) = self.prompts.get_mut(index) {
                    *prompt = value;
                }
                Effect::None
            }
            Message::ToggleOption(option) => {
                self.options.toggle(option);
                Effect::None
            }
            Message::SetAspectRatio(aspect_ratio) => {
                if self.aspect_ratio_locked() {
                    log::debug!("Aspect ratio locked by base image, ignoring {}", aspect_ratio);
                } else {
                    self.aspect_ratio = aspect_ratio;
                }
                Effect::None
            }
            Message::Generate => self.start_generation(),
            Message::GenerationFinished(results) => {
                self.results = results;
                self.is_loading = false;
                self.fullscreen = None;
                Effect::None
            }
            Message::OpenViewer(index) => {
                match self.results.get(index) {
                    Some(result) if !result.is_error() => self.fullscreen = Some(index),
                    Some(_) => log::debug!("No fullscreen view for failed result {}", index),
                    None => self.error = Some(VariatorError::NoSuchResult(index).to_string()),
                }
                Effect::None
            }
            Message::CloseViewer | Message::KeyPressed(Key::Escape) => {
                self.fullscreen = None;
                Effect::None
            }
            Message::Download(index) => self.download(index),
            Message::UseAsInput(index) => {
                self.use_as_input(index);
                Effect::None
            }
        }
    }

    /// The new preview is issued before the old one is revoked.
    fn select_base_image(&mut self, file: FileHandle) {
        let preview_url = self.previews.create(&file.name);
        let previous = self.base_image.replace(ImageFile { file, preview_url });
        if let Some(previous) = previous {
            self.previews.revoke(&previous.preview_url);
        }
        self.results.clear();
        self.fullscreen = None;
        self.error = None;
    }

    fn start_generation(&mut self) -> Effect {
        if self.is_loading {
            return Effect::None;
        }
        if !has_usable_prompt(&self.prompts) {
            self.error = Some(MSG_NO_PROMPT.to_string());
            return Effect::None;
        }

        self.is_loading = true;
        self.error = None;
        self.results.clear();
        self.fullscreen = None;

        let base_image = self.base_image.as_ref().map(|image| image.file.clone());
        let reference_images = if base_image.is_some() {
            self.reference_images.iter().map(|image| image.file.clone()).collect()
        } else {
            Vec::new()
        };
        Effect::Generate(GenerationJob {
            base_image,
            prompts: compose_prompts(&self.prompts, &self.options),
            reference_images,
            aspect_ratio: self.aspect_ratio,
        })
    }

    fn download(&mut self, index: usize) -> Effect {
        let result = match self.results.get(index) {
            Some(result) if !result.is_error() => result,
            Some(_) => return Effect::None,
            None => {
                self.error = Some(VariatorError::NoSuchResult(index).to_string());
                return Effect::None;
            }
        };
        match result.image.decode() {
            Ok(bytes) => Effect::Save(SaveRequest {
                file_name: download_file_name(&result.prompt),
                bytes,
            }),
            Err(e) => {
                self.error = Some(e.to_string());
                Effect::None
            }
        }
    }

    fn use_as_input(&mut self, index: usize) {
        let file = match self.results.get(index) {
            Some(result) if !result.is_error() => result
                .image
                .decode()
                .and_then(|bytes| {
                    FileHandle::from_bytes(download_file_name(&result.prompt), bytes)
                }),
            Some(_) => return,
            None => Err(VariatorError::NoSuchResult(index)),
        };
        match file {
            Ok(file) => self.select_base_image(file),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn base_image(&self) -> Option<&ImageFile> {
        self.base_image.as_ref()
    }

    pub fn reference_images(&self) -> &[ImageFile] {
        &self.reference_images
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn options(&self) -> &PromptOptions {
        &self.options
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn aspect_ratio_locked(&self) -> bool {
        self.base_image.is_some()
    }

    pub fn results(&self) -> &[GeneratedImage] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn fullscreen_image(&self) -> Option<&GeneratedImage> {
        self.fullscreen.and_then(|index| self.results.get(index))
    }

    pub fn can_generate(&self) -> bool {
        has_usable_prompt(&self.prompts) && !self.is_loading
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }
}
