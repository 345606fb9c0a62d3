use crate::gemini::GeminiRequestBody;
use crate::imagen::ImagenRequestBody;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const IMAGEN_MODEL: &str = "imagen-4.0-generate-001";
pub const GEMINI_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const IMAGEN_OUTPUT_MIME: &str = "image/jpeg";
pub const API_KEY_HEADER: &str = "x-goog-api-key";
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
pub const API_BASE_VAR: &str = "VARIATOR_API_BASE";

pub const ERROR_SENTINEL: &str = "error";
pub const MSG_NO_PROMPT: &str = "Please provide at least one prompt.";
pub const MSG_NO_IMAGES: &str = "API did not return any images.";
pub const MSG_NO_IMAGE_GENERATED: &str = "No image was generated for the prompt.";

pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];
pub const ASPECT_RATIOS: [&str; 5] = ["1:1", "16:9", "9:16", "4:3", "3:4"];

pub const SUFFIX_THIN_BORDER: &str = "with a thin border around the image";
pub const SUFFIX_TRANSPARENT_BG: &str = "isolated on transparent background.";
pub const SUFFIX_CUTE_STYLE: &str = "cute simple Flat 2D style";
pub const SUFFIX_VECTOR_STYLE: &str = "vector in icon style";

pub const DOWNLOAD_PREFIX: &str = "variation_";
pub const DOWNLOAD_STEM_LEN: usize = 50;

pub const CMD_GENERATE: &str = "gen";
pub const CMD_VIEW: &str = "view";
pub const CMD_CLOSE: &str = "close";
pub const CMD_ESCAPE: &str = "esc";
pub const CMD_SAVE: &str = "save";
pub const CMD_USE: &str = "use";
pub const CMD_ADD_PROMPT: &str = "add";
pub const CMD_SET_PROMPT: &str = "set";
pub const CMD_REMOVE_PROMPT: &str = "rm";
pub const CMD_TOGGLE: &str = "toggle";
pub const CMD_RATIO: &str = "ratio";
pub const CMD_REFERENCE: &str = "ref";
pub const CMD_UNREFERENCE: &str = "unref";
pub const CMD_IMAGE: &str = "image";
pub const CMD_REMOVE_IMAGE: &str = "unimage";
pub const CMD_SHOW: &str = "show";
pub const CMD_HELP: &str = "help";
pub const CMD_QUIT: &str = "quit";

/// Body of one outgoing generation call.
pub enum RequestType {
    TextToImage(ImagenRequestBody),
    ImageEdit(GeminiRequestBody),
}
