//! 海报活动信息提取 - 从拍摄的海报/传单中识别标题、描述和活动时间
//!
//! 处理流程：
//! 1. 质量检测 - 亮度/对比度，仅作提示
//! 2. 二值化 - 灰度 + 固定阈值
//! 3. 多语言 OCR - 取最长的识别结果
//! 4. 字段拆分 - 首行为标题，剔除日期行后为描述
//! 5. 日期时间提取 - 多级策略链

pub mod calendar;
pub mod capture;
pub mod datetime;
pub mod error;
pub mod fields;
pub mod ocr;
pub mod pipeline;
pub mod quality;
pub mod transcription;

pub use calendar::google_calendar_url;
pub use capture::CapturedImage;
pub use datetime::{DateTimeCandidate, DateTimeExtractor, StrategyTier};
pub use error::{ConfigError, ImageError, OcrError};
pub use fields::{FieldSplitter, SplitFields};
pub use ocr::{MockOcrEngine, OcrEngine, OcrOptions, TesseractEngine};
pub use pipeline::{ExtractionPipeline, ExtractionResult, PipelineConfig, PipelineOutput};
pub use quality::{ImageQualityGate, QualityScore, QualityThresholds};
pub use transcription::{BestTranscription, TranscriptionAttempt, TranscriptionSelector};
