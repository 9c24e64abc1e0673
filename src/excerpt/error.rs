use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExcerptError {
    #[error("Not a valid excerpt from Books")]
    NotRecognized,

    #[error("Excerpt content is empty, nothing to share")]
    EmptyContent,

    #[error("Card width must be a positive number within the pixel limit, got {0}")]
    InvalidWidth(f32),

    #[error("Display scale must be a positive number within the pixel limit, got {0}")]
    InvalidScale(f32),

    #[error("Card would be {width}x{height} pixels, larger than the {max} pixel limit per side")]
    CardTooLarge { width: u32, height: u32, max: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExcerptError>;
