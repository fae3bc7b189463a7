use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
    #[error("Tesseract error: {0}")]
    Tesseract(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Json5(#[from] json5::Error),
    #[error("Config serialize error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("At least one language hint is required")]
    NoLanguageHints,
    #[error("Language hint #{index} is blank")]
    BlankLanguageHint { index: usize },
    #[error("Invalid threshold {name}: {value}")]
    InvalidThreshold { name: &'static str, value: f32 },
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },
}
