use crate::constants::{API_KEY_HEADER, DOWNLOAD_PREFIX, DOWNLOAD_STEM_LEN};
use crate::error::{Result, VariatorError};
use crate::gemini::InlineData;
use crate::types::FileHandle;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

pub fn build_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(API_KEY_HEADER),
        HeaderValue::from_str(api_key)?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

pub fn create_spinner(color: &str, message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template(&format!("{{spinner:.{}}} {{msg}}", color)),
    );
    spinner.enable_steady_tick(100);
    spinner.set_message(message);

    spinner
}

pub fn encode_file(file: &FileHandle) -> InlineData {
    InlineData {
        mime_type: file.mime_type.clone(),
        data: base64::encode(&file.bytes),
    }
}

/// `variation_<prompt>.png` with every non-alphanumeric character replaced
/// by `_`, lower-cased and cut to 50 characters.
pub fn download_file_name(prompt: &str) -> String {
    let stem: String = prompt
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .take(DOWNLOAD_STEM_LEN)
        .collect();
    format!("{}{}.png", DOWNLOAD_PREFIX, stem)
}

/// Writes into `dir` without replacing existing files: a taken name gets a
/// `_1`, `_2`, ... suffix before its extension.
pub fn save_bytes(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let write_error = |path: &Path, source| VariatorError::Write {
        path: path.display().to_string(),
        source,
    };
    fs::create_dir_all(dir).map_err(|source| write_error(dir, source))?;

    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, extension)) => (stem, format!(".{}", extension)),
        None => (file_name, String::new()),
    };
    let mut attempt = 0;
    loop {
        let path = if attempt == 0 {
            dir.join(file_name)
        } else {
            dir.join(format!("{}_{}{}", stem, attempt, extension))
        };
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(bytes).map_err(|source| write_error(&path, source))?;
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(source) => return Err(write_error(&path, source)),
        }
    }
}
