use std::collections::HashMap;

use image::{DynamicImage, GrayImage};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::error::OcrError;

pub const DEFAULT_CHAR_WHITELIST: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789 .,!?@:-/()";

/// OCR 引擎固定参数（由流水线提供，不按调用变化）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrOptions {
    pub char_whitelist: String,
    /// Tesseract page segmentation mode (6 = single uniform block of text)
    pub page_seg_mode: i32,
    pub preserve_interword_spaces: bool,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            char_whitelist: DEFAULT_CHAR_WHITELIST.to_string(),
            page_seg_mode: 6,
            preserve_interword_spaces: true,
        }
    }
}

pub trait OcrEngine: Send + Sync {
    /// Returns the transcription for one language hint; an empty string is a valid result.
    fn recognize(
        &self,
        image: &GrayImage,
        language_hint: &str,
        options: &OcrOptions,
    ) -> Result<String, OcrError>;
}

/// 系统 tesseract 后端，无需下载模型
pub struct TesseractEngine {
    dpi: Option<i32>,
}

impl TesseractEngine {
    pub fn new() -> Self {
        Self { dpi: Some(300) }
    }

    pub fn with_dpi(dpi: Option<i32>) -> Self {
        Self { dpi }
    }

    fn build_args(&self, language_hint: &str, options: &OcrOptions) -> rusty_tesseract::Args {
        let mut config_variables = HashMap::new();
        if !options.char_whitelist.is_empty() {
            config_variables.insert(
                "tessedit_char_whitelist".to_string(),
                options.char_whitelist.clone(),
            );
        }
        config_variables.insert(
            "preserve_interword_spaces".to_string(),
            if options.preserve_interword_spaces { "1" } else { "0" }.to_string(),
        );

        rusty_tesseract::Args {
            lang: language_hint.to_string(),
            config_variables,
            dpi: self.dpi,
            psm: Some(options.page_seg_mode),
            oem: Some(3),
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(
        &self,
        image: &GrayImage,
        language_hint: &str,
        options: &OcrOptions,
    ) -> Result<String, OcrError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(OcrError::EmptyImage { width, height });
        }

        info!(
            "Running tesseract [{}] on {}x{} image...",
            language_hint, width, height
        );

        let dynamic_img = DynamicImage::ImageLuma8(image.clone());
        let tess_img = rusty_tesseract::Image::from_dynamic_image(&dynamic_img)
            .map_err(|e| OcrError::Tesseract(format!("Failed to create tesseract image: {}", e)))?;

        let args = self.build_args(language_hint, options);
        let text = rusty_tesseract::image_to_string(&tess_img, &args)
            .map_err(|e| OcrError::Tesseract(e.to_string()))?;

        debug!("[{}] recognized {} chars", language_hint, text.len());
        Ok(text)
    }
}

/// 测试用 OCR 引擎：按语言返回固定结果或错误
pub struct MockOcrEngine {
    responses: HashMap<String, Result<String, String>>,
}

impl MockOcrEngine {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    pub fn with_text(mut self, language_hint: &str, text: &str) -> Self {
        self.responses
            .insert(language_hint.to_string(), Ok(text.to_string()));
        self
    }

    pub fn with_failure(mut self, language_hint: &str, message: &str) -> Self {
        self.responses
            .insert(language_hint.to_string(), Err(message.to_string()));
        self
    }
}

impl Default for MockOcrEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for MockOcrEngine {
    fn recognize(
        &self,
        _image: &GrayImage,
        language_hint: &str,
        _options: &OcrOptions,
    ) -> Result<String, OcrError> {
        match self.responses.get(language_hint) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(message)) => Err(OcrError::Engine(message.clone())),
            None => Ok(String::new()),
        }
    }
}
