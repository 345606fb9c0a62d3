use crate::store::AppState;
use crate::types::{GeneratedImage, ImageFile, PromptOption};
use colored::Colorize;
use std::fmt::Write;

const EMPTY_RESULTS: &str = "Generate images from prompts to see results here.";
const LOADING_RESULTS: &str = "Generating images...";
const LOCKED_RATIO: &str = "Locked to match uploaded image dimensions.";

pub fn render_header() -> String {
    format!(
        "{:━^60}\n{}\n",
        " Ad Image Variator ".cyan().bold(),
        "Generate creative variations of your social media ads with AI.".dimmed()
    )
}

pub fn render_form(state: &AppState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "Prompts".cyan().bold());
    for (index, prompt) in state.prompts().iter().enumerate() {
        let shown = if prompt.trim().is_empty() {
            "(empty)".dimmed().to_string()
        } else {
            prompt.clone()
        };
        let _ = writeln!(out, "  [{}] {}", index, shown);
    }

    let _ = writeln!(out, "{}", "Prompt Options".cyan().bold());
    for option in PromptOption::ALL {
        let mark = if state.options().is_enabled(option) { "x" } else { " " };
        let _ = writeln!(out, "  [{}] {:<12} adds '{}'", mark, option.name(), option.suffix());
    }

    let _ = writeln!(out, "{}", "Base Image".cyan().bold());
    match state.base_image() {
        Some(image) => {
            let _ = writeln!(out, "  {}", describe_file(image));
        }
        None => {
            let _ = writeln!(out, "  {}", "none (text-to-image)".dimmed());
        }
    }

    if state.base_image().is_some() {
        let _ = writeln!(out, "{}", "Reference Images".cyan().bold());
        if state.reference_images().is_empty() {
            let _ = writeln!(out, "  {}", "none".dimmed());
        }
        for (index, image) in state.reference_images().iter().enumerate() {
            let _ = writeln!(out, "  [{}] {}", index, describe_file(image));
        }
    }

    let _ = writeln!(out, "{}", "Aspect Ratio".cyan().bold());
    if state.aspect_ratio_locked() {
        let _ = writeln!(out, "  {}", LOCKED_RATIO.dimmed());
    } else {
        let _ = writeln!(out, "  {}", state.aspect_ratio());
    }

    if let Some(error) = state.error() {
        let _ = writeln!(out, "{}", error.red());
    }
    out
}

fn describe_file(image: &ImageFile) -> String {
    format!(
        "{} ({}, {} bytes) {}",
        image.file.name,
        image.file.mime_type,
        image.file.bytes.len(),
        image.preview_url.as_str().dimmed()
    )
}

pub fn render_results(state: &AppState) -> String {
    if state.base_image().is_none() && !state.is_loading() && state.results().is_empty() {
        return format!("{}\n", EMPTY_RESULTS.dimmed());
    }
    if state.is_loading() && state.results().is_empty() {
        return format!("{}\n{}\n", LOADING_RESULTS.cyan(), "This can take a moment.".dimmed());
    }

    let mut out = format!("{}\n", "Results".cyan().bold());
    if let Some(image) = state.base_image() {
        let _ = writeln!(out, "{}", "── Original Image".cyan());
        let _ = writeln!(out, "   {}", describe_file(image));
    }
    for (index, result) in state.results().iter().enumerate() {
        out.push_str(&render_card(index, result));
    }
    out
}

pub fn render_card(index: usize, result: &GeneratedImage) -> String {
    let mut out = format!("{} {}\n", format!("── #{}", index).cyan(), result.prompt.bold());
    if result.is_error() {
        let _ = writeln!(out, "   {}", "Generation Failed".red().bold());
        if let Some(message) = &result.text {
            let _ = writeln!(out, "   {}", message.red());
        }
        return out;
    }

    let _ = writeln!(out, "   {}", describe_image(result));
    if let Some(caption) = &result.text {
        let _ = writeln!(out, "   \"{}\"", caption.italic());
    }
    let _ = writeln!(out, "   {}", format!("view {0} · save {0} · use {0}", index).dimmed());
    out
}

fn describe_image(result: &GeneratedImage) -> String {
    let mime_type = result.image.mime_type().unwrap_or("image");
    match result.image.decode() {
        Ok(bytes) => format!("{}, {} bytes", mime_type, bytes.len()),
        Err(_) => mime_type.to_string(),
    }
}

pub fn render_viewer(image: &GeneratedImage) -> String {
    let mut out = format!("{:━^60}\n", " Fullscreen ".cyan());
    let _ = writeln!(out, "{}", image.prompt.bold());
    let _ = writeln!(out, "{}", describe_image(image));
    if let Some(caption) = &image.text {
        let _ = writeln!(out, "\"{}\"", caption.italic());
    }
    let _ = writeln!(out, "{}", "close or esc to return".dimmed());
    let _ = writeln!(out, "{:━^60}", "".cyan());
    out
}

pub fn render(state: &AppState) -> String {
    match state.fullscreen_image() {
        Some(image) => render_viewer(image),
        None => format!("{}\n{}", render_form(state), render_results(state)),
    }
}
