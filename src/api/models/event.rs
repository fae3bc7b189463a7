use serde::{Deserialize, Serialize};

use crate::core::poster::{PipelineOutput, QualityScore};

/// 拍摄质量提示
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub is_bright: bool,
    pub has_contrast: bool,
    pub resolution: u64,
    /// 质量不佳时给用户的提示文案
    pub warning: Option<String>,
}

impl From<QualityScore> for QualityReport {
    fn from(score: QualityScore) -> Self {
        Self {
            is_bright: score.is_bright,
            has_contrast: score.has_contrast,
            resolution: score.resolution,
            warning: score.warning().map(str::to_string),
        }
    }
}

/// 海报识别结果，持久化由调用方负责
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventScan {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DDTHH:MM`，未识别到时为空
    pub date_time: Option<String>,
    pub quality: QualityReport,
    pub language_hint: Option<String>,
}

impl From<PipelineOutput> for EventScan {
    fn from(output: PipelineOutput) -> Self {
        Self {
            title: output.result.title,
            description: output.result.description,
            date_time: output.result.date_time_iso,
            quality: output.quality.into(),
            language_hint: output.language_hint,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventFields {
    pub title: String,
    pub description: String,
    pub date_time: Option<String>,
}
