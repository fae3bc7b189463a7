use chrono::NaiveDateTime;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::poster::capture::CapturedImage;
use crate::core::poster::datetime::DateTimeExtractor;
use crate::core::poster::error::ConfigError;
use crate::core::poster::fields::{FieldSplitter, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};
use crate::core::poster::ocr::{OcrEngine, OcrOptions};
use crate::core::poster::quality::{ImageQualityGate, QualityScore, QualityThresholds};
use crate::core::poster::transcription::TranscriptionSelector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// 按优先级排列的 OCR 语言假设
    pub language_hints: Vec<String>,
    pub quality: QualityThresholds,
    /// 二值化阈值 (0-255)
    pub binarize_threshold: u8,
    pub ocr: OcrOptions,
    pub title_max_chars: usize,
    pub description_max_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            language_hints: vec![
                "eng".to_string(),
                "eng+fra".to_string(),
                "eng+spa".to_string(),
            ],
            quality: QualityThresholds::default(),
            binarize_threshold: 128,
            ocr: OcrOptions::default(),
            title_max_chars: TITLE_MAX_CHARS,
            description_max_chars: DESCRIPTION_MAX_CHARS,
        }
    }
}

impl PipelineConfig {
    pub fn english_only() -> Self {
        Self {
            language_hints: vec!["eng".to_string()],
            ..Default::default()
        }
    }

    /// Lenient JSON5 config; missing fields fall back to defaults.
    pub fn from_json5(source: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = json5::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.language_hints.is_empty() {
            return Err(ConfigError::NoLanguageHints);
        }
        if let Some(index) = self.language_hints.iter().position(|h| h.trim().is_empty()) {
            return Err(ConfigError::BlankLanguageHint { index });
        }
        self.quality.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub title: String,
    pub description: String,
    pub date_time_iso: Option<String>,
}

/// 提取结果 + 拍摄质量提示（质量仅供调用方提示用户）
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub quality: QualityScore,
    pub warning: Option<&'static str>,
    pub language_hint: Option<String>,
    pub result: ExtractionResult,
}

pub struct ExtractionPipeline {
    engine: Box<dyn OcrEngine>,
    quality_gate: ImageQualityGate,
    splitter: FieldSplitter,
    extractor: DateTimeExtractor,
    config: PipelineConfig,
}

impl ExtractionPipeline {
    pub fn new(engine: Box<dyn OcrEngine>) -> Self {
        Self::with_config(engine, PipelineConfig::default())
    }

    pub fn with_config(engine: Box<dyn OcrEngine>, config: PipelineConfig) -> Self {
        Self {
            engine,
            quality_gate: ImageQualityGate::with_thresholds(config.quality),
            splitter: FieldSplitter::with_title_limit(config.title_max_chars),
            extractor: DateTimeExtractor::new(),
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn assess(&self, image: &CapturedImage) -> QualityScore {
        self.quality_gate.assess(image)
    }

    pub fn run(&self, image: &CapturedImage, now: NaiveDateTime) -> PipelineOutput {
        let quality = self.quality_gate.assess(image);
        let warning = quality.warning();
        if let Some(message) = warning {
            warn!("Low quality capture ({}x{}): {}", image.width, image.height, message);
        }

        // 质量结果不影响后续流程
        let normalized = image.binarize(self.config.binarize_threshold);
        let selector = TranscriptionSelector::new(self.engine.as_ref(), &self.config.ocr);
        let best = selector.select_best(&normalized, &self.config.language_hints);

        let result = self.extract_from_text(&best.text, now);
        info!(
            "Extraction done: title={:?}, date_time={:?}",
            result.title, result.date_time_iso
        );

        PipelineOutput {
            quality,
            warning,
            language_hint: best.language_hint,
            result,
        }
    }

    /// Field split + date/time extraction on already transcribed text.
    pub fn extract_from_text(&self, text: &str, now: NaiveDateTime) -> ExtractionResult {
        let fields = self.splitter.split(text);
        // 日期从完整文本提取，而不是过滤后的描述
        let date_time_iso = self.extractor.extract(text, now);

        let description = fields.description(self.config.description_max_chars);

        ExtractionResult {
            title: fields.title,
            description,
            date_time_iso,
        }
    }
}
