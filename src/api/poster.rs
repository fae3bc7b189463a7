//! 海报活动识别器

use crate::api::models::event::{EventFields, EventScan, QualityReport};
use crate::core::poster::datetime::parse_iso_minute;
use crate::core::poster::{
    google_calendar_url, CapturedImage, ExtractionPipeline, PipelineConfig, TesseractEngine,
};
use chrono::NaiveDateTime;
use flutter_rust_bridge::frb;
use log::{error, info};
use serde::{Deserialize, Serialize};

/// 海报识别 API 错误类型，FRB 友好的设计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanApiError {
    pub error_type: String,
    pub message: String,
}

impl ScanApiError {
    fn invalid_image(e: String) -> Self {
        Self {
            error_type: "InvalidImage".to_string(),
            message: format!("图片解码失败: {}", e),
        }
    }

    fn invalid_config(e: String) -> Self {
        Self {
            error_type: "InvalidConfig".to_string(),
            message: format!("配置解析失败: {}", e),
        }
    }

    fn invalid_date_time(value: &str) -> Self {
        Self {
            error_type: "InvalidDateTime".to_string(),
            message: format!("无法解析时间: {} (需要 YYYY-MM-DDTHH:MM)", value),
        }
    }
}

impl std::fmt::Display for ScanApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.error_type, self.message)
    }
}

impl std::error::Error for ScanApiError {}

/// 海报识别器 - 质量检测 + 多语言 OCR + 字段/时间提取
///
/// ```dart
/// final scanner = EventScanner.create();
/// final scan = scanner.scanImage(imageBytes: pngBytes);
/// if (scan.quality.warning != null) showWarning(scan.quality.warning!);
/// ```
#[frb(opaque)]
pub struct EventScanner {
    pipeline: ExtractionPipeline,
}

impl EventScanner {
    /// 使用默认配置（eng / eng+fra / eng+spa）创建
    #[frb(sync)]
    pub fn create() -> Self {
        crate::init_logging();
        info!("📷 EventScanner: created with default config");
        Self {
            pipeline: ExtractionPipeline::new(Box::new(TesseractEngine::new())),
        }
    }

    /// 使用 JSON5 配置创建
    #[frb(sync)]
    pub fn create_with_config(config_json5: String) -> Result<Self, ScanApiError> {
        crate::init_logging();
        let config = PipelineConfig::from_json5(&config_json5).map_err(|e| {
            error!("❌ Invalid scanner config: {}", e);
            ScanApiError::invalid_config(e.to_string())
        })?;
        info!("📷 EventScanner: created with hints {:?}", config.language_hints);
        Ok(Self {
            pipeline: ExtractionPipeline::with_config(Box::new(TesseractEngine::new()), config),
        })
    }

    /// 拍摄后立即检测质量（不跑 OCR）
    #[frb(sync)]
    pub fn check_quality(&self, image_bytes: Vec<u8>) -> Result<QualityReport, ScanApiError> {
        let image = decode(&image_bytes)?;
        Ok(self.pipeline.assess(&image).into())
    }

    /// 识别海报，`now` 为空时使用本地当前时间
    pub fn scan_image(
        &self,
        image_bytes: Vec<u8>,
        now: Option<String>,
    ) -> Result<EventScan, ScanApiError> {
        let now = resolve_now(now)?;
        let image = decode(&image_bytes)?;
        info!("🔍 Scanning {}x{} poster", image.width, image.height);
        Ok(self.pipeline.run(&image, now).into())
    }

    /// 用户修改识别文本后重新提取
    #[frb(sync)]
    pub fn extract_from_text(
        &self,
        text: String,
        now: Option<String>,
    ) -> Result<EventFields, ScanApiError> {
        let now = resolve_now(now)?;
        let result = self.pipeline.extract_from_text(&text, now);
        Ok(EventFields {
            title: result.title,
            description: result.description,
            date_time: result.date_time_iso,
        })
    }
}

impl Drop for EventScanner {
    fn drop(&mut self) {
        info!("🗑️ EventScanner: released");
    }
}

/// 生成 Google 日历添加事件链接（时长 1 小时）
#[frb(sync)]
pub fn build_google_calendar_url(
    title: String,
    date_time: String,
    description: String,
) -> Result<String, ScanApiError> {
    let start =
        parse_iso_minute(&date_time).ok_or_else(|| ScanApiError::invalid_date_time(&date_time))?;
    Ok(google_calendar_url(&title, start, &description))
}

fn decode(image_bytes: &[u8]) -> Result<CapturedImage, ScanApiError> {
    CapturedImage::from_encoded(image_bytes).map_err(|e| {
        error!("❌ Failed to decode image: {}", e);
        ScanApiError::invalid_image(e.to_string())
    })
}

fn resolve_now(now: Option<String>) -> Result<NaiveDateTime, ScanApiError> {
    match now {
        Some(value) => parse_iso_minute(&value).ok_or_else(|| ScanApiError::invalid_date_time(&value)),
        None => Ok(chrono::Local::now().naive_local()),
    }
}
