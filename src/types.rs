use crate::constants::{
    ACCEPTED_MIME_TYPES, ASPECT_RATIOS, ERROR_SENTINEL, SUFFIX_CUTE_STYLE, SUFFIX_THIN_BORDER,
    SUFFIX_TRANSPARENT_BG, SUFFIX_VECTOR_STYLE,
};
use crate::error::{Result, VariatorError};
use crate::preview::PreviewUrl;
use std::{fmt, fs, path::Path, str::FromStr};

/// Raw bytes of a user-selected image together with its name and MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileHandle {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| VariatorError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(name, bytes)
    }

    /// Detects the MIME type from magic bytes, then the file extension.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let mime_type = sniff_mime(&bytes)
            .or_else(|| mime_from_extension(&name))
            .filter(|mime| ACCEPTED_MIME_TYPES.contains(mime))
            .ok_or_else(|| VariatorError::UnsupportedMime(name.clone()))?;
        Ok(Self {
            name,
            mime_type: mime_type.to_string(),
            bytes,
        })
    }
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

fn mime_from_extension(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        _ => return None,
    };
    Some(mime)
}

/// A selected file and the preview reference issued for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file: FileHandle,
    pub preview_url: PreviewUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOption {
    ThinBorder,
    TransparentBackground,
    CuteStyle,
    VectorStyle,
}

impl PromptOption {
    /// Declaration order, which is also the order suffixes are appended in.
    pub const ALL: [PromptOption; 4] = [
        PromptOption::ThinBorder,
        PromptOption::TransparentBackground,
        PromptOption::CuteStyle,
        PromptOption::VectorStyle,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            PromptOption::ThinBorder => SUFFIX_THIN_BORDER,
            PromptOption::TransparentBackground => SUFFIX_TRANSPARENT_BG,
            PromptOption::CuteStyle => SUFFIX_CUTE_STYLE,
            PromptOption::VectorStyle => SUFFIX_VECTOR_STYLE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PromptOption::ThinBorder => "border",
            PromptOption::TransparentBackground => "transparent",
            PromptOption::CuteStyle => "cute",
            PromptOption::VectorStyle => "vector",
        }
    }
}

impl FromStr for PromptOption {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        PromptOption::ALL
            .into_iter()
            .find(|option| option.name() == s)
            .ok_or_else(|| {
                format!(
                    "unknown option '{}': expected border, transparent, cute or vector",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptOptions {
    pub thin_border: bool,
    pub transparent_background: bool,
    pub cute_style: bool,
    pub vector_style: bool,
}

impl PromptOptions {
    pub fn is_enabled(&self, option: PromptOption) -> bool {
        match option {
            PromptOption::ThinBorder => self.thin_border,
            PromptOption::TransparentBackground => self.transparent_background,
            PromptOption::CuteStyle => self.cute_style,
            PromptOption::VectorStyle => self.vector_style,
        }
    }

    pub fn toggle(&mut self, option: PromptOption) {
        let flag = match option {
            PromptOption::ThinBorder => &mut self.thin_border,
            PromptOption::TransparentBackground => &mut self.transparent_background,
            PromptOption::CuteStyle => &mut self.cute_style,
            PromptOption::VectorStyle => &mut self.vector_style,
        };
        *flag = !*flag;
    }

    pub fn enabled_suffixes(&self) -> impl Iterator<Item = &'static str> + '_ {
        PromptOption::ALL
            .into_iter()
            .filter(move |option| self.is_enabled(*option))
            .map(PromptOption::suffix)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AspectRatio {
    #[default]
    Square,
    Landscape,
    Portrait,
    Classic,
    ClassicPortrait,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::Classic,
        AspectRatio::ClassicPortrait,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => ASPECT_RATIOS[0],
            AspectRatio::Landscape => ASPECT_RATIOS[1],
            AspectRatio::Portrait => ASPECT_RATIOS[2],
            AspectRatio::Classic => ASPECT_RATIOS[3],
            AspectRatio::ClassicPortrait => ASPECT_RATIOS[4],
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unsupported aspect ratio '{}': expected one of {}",
                    s,
                    ASPECT_RATIOS.join(", ")
                )
            })
    }
}

/// Image half of a generation result. `Failed` is the error sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    DataUrl(String),
    Failed,
}

impl ImageRef {
    pub fn from_base64(mime_type: &str, data: &str) -> Self {
        ImageRef::DataUrl(format!("data:{};base64,{}", mime_type, data))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ImageRef::Failed)
    }

    pub fn mime_type(&self) -> Option<&str> {
        match self {
            ImageRef::DataUrl(url) => url.strip_prefix("data:")?.split(';').next(),
            ImageRef::Failed => None,
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        let url = match self {
            ImageRef::DataUrl(url) => url,
            ImageRef::Failed => return Err(VariatorError::InvalidDataUrl),
        };
        let (header, payload) = url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .ok_or(VariatorError::InvalidDataUrl)?;
        if !header.ends_with(";base64") {
            return Err(VariatorError::InvalidDataUrl);
        }
        Ok(base64::decode(payload)?)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRef::DataUrl(url) => f.write_str(url),
            ImageRef::Failed => f.write_str(ERROR_SENTINEL),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub prompt: String,
    pub image: ImageRef,
    /// Caption on success, error message on failure.
    pub text: Option<String>,
}

impl GeneratedImage {
    pub fn failed(prompt: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: ImageRef::Failed,
            text: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.image.is_failed()
    }
}
