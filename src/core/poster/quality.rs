use serde::{Deserialize, Serialize};

use super::capture::CapturedImage;
use super::error::ConfigError;

pub const LOW_QUALITY_WARNING: &str =
    "Image might be too dark/blurry. Try again with better lighting.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScore {
    pub is_bright: bool,
    pub has_contrast: bool,
    /// width * height，仅供参考
    pub resolution: u64,
}

impl QualityScore {
    pub fn is_acceptable(&self) -> bool {
        self.is_bright && self.has_contrast
    }

    pub fn warning(&self) -> Option<&'static str> {
        if self.is_acceptable() {
            None
        } else {
            Some(LOW_QUALITY_WARNING)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// 平均亮度阈值 (0-255)
    pub brightness: f32,
    /// 相邻像素平均亮度差阈值
    pub contrast: f32,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            brightness: 128.0,
            contrast: 30.0,
        }
    }
}

impl QualityThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=255.0).contains(&self.brightness) {
            return Err(ConfigError::InvalidThreshold {
                name: "brightness",
                value: self.brightness,
            });
        }
        if !(0.0..=255.0).contains(&self.contrast) {
            return Err(ConfigError::InvalidThreshold {
                name: "contrast",
                value: self.contrast,
            });
        }
        Ok(())
    }
}

/// 拍摄质量检测（仅提示，不阻塞后续 OCR）
pub struct ImageQualityGate {
    thresholds: QualityThresholds,
}

impl ImageQualityGate {
    pub fn new() -> Self {
        Self::with_thresholds(QualityThresholds::default())
    }

    pub fn with_thresholds(thresholds: QualityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn assess(&self, image: &CapturedImage) -> QualityScore {
        let resolution = image.width as u64 * image.height as u64;
        let pixel_count = image.pixel_count();

        if pixel_count == 0 {
            return QualityScore {
                is_bright: false,
                has_contrast: false,
                resolution,
            };
        }

        let mut brightness_sum = 0.0f64;
        let mut contrast_sum = 0.0f64;
        let mut prev: Option<f32> = None;

        // 单次扫描：亮度累加 + 与前一像素（光栅顺序）的亮度差
        for value in image.brightness() {
            brightness_sum += value as f64;
            if let Some(p) = prev {
                contrast_sum += (value - p).abs() as f64;
            }
            prev = Some(value);
        }

        let mean_brightness = brightness_sum / pixel_count as f64;
        let mean_contrast = contrast_sum / pixel_count as f64;

        QualityScore {
            is_bright: mean_brightness > self.thresholds.brightness as f64,
            has_contrast: mean_contrast > self.thresholds.contrast as f64,
            resolution,
        }
    }
}

impl Default for ImageQualityGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32, fill: u8) -> CapturedImage {
        let data = vec![fill; (width * height * 4) as usize];
        CapturedImage::from_rgba(width, height, data).unwrap()
    }

    fn create_checkerboard(width: u32, height: u32) -> CapturedImage {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for i in 0..(width * height) {
            let v = if i % 2 == 0 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
        CapturedImage::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn test_dark_uniform_image() {
        let gate = ImageQualityGate::new();
        let score = gate.assess(&create_test_image(64, 48, 40));

        assert!(!score.is_bright);
        assert!(!score.has_contrast);
        assert_eq!(score.resolution, 64 * 48);
        assert_eq!(score.warning(), Some(LOW_QUALITY_WARNING));
    }

    #[test]
    fn test_alternating_pixels_have_contrast() {
        let gate = ImageQualityGate::new();
        let score = gate.assess(&create_checkerboard(31, 7));

        assert!(score.has_contrast);
        // 平均亮度约 127.5，不算明亮
        assert!(!score.is_bright);
    }

    #[test]
    fn test_bright_uniform_image_lacks_contrast() {
        let gate = ImageQualityGate::new();
        let score = gate.assess(&create_test_image(10, 10, 200));

        assert!(score.is_bright);
        assert!(!score.has_contrast);
        assert!(!score.is_acceptable());
    }

    #[test]
    fn test_bright_textured_image_is_acceptable() {
        let mut data = Vec::new();
        for i in 0..100u32 {
            let v = if i % 2 == 0 { 150 } else { 250 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
        let image = CapturedImage::from_rgba(10, 10, data).unwrap();
        let score = ImageQualityGate::new().assess(&image);

        assert!(score.is_acceptable());
        assert_eq!(score.warning(), None);
    }

    #[test]
    fn test_empty_image() {
        let image = CapturedImage::from_rgba(0, 0, vec![]).unwrap();
        let score = ImageQualityGate::new().assess(&image);
        assert_eq!(
            score,
            QualityScore {
                is_bright: false,
                has_contrast: false,
                resolution: 0
            }
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let gate = ImageQualityGate::with_thresholds(QualityThresholds {
            brightness: 30.0,
            contrast: 30.0,
        });
        assert!(gate.assess(&create_test_image(8, 8, 40)).is_bright);
    }

    #[test]
    fn test_threshold_validation() {
        let bad = QualityThresholds {
            brightness: 300.0,
            contrast: 30.0,
        };
        assert!(bad.validate().is_err());
        assert!(QualityThresholds::default().validate().is_ok());
    }

    proptest! {
        #[test]
        fn prop_uniform_gray_below_128_is_not_bright(value in 0u8..128, w in 1u32..32, h in 1u32..32) {
            let score = ImageQualityGate::new().assess(&create_test_image(w, h, value));
            prop_assert!(!score.is_bright);
            prop_assert!(!score.has_contrast);
        }

        #[test]
        fn prop_uniform_gray_above_128_is_bright(value in 129u8..=255, w in 1u32..32, h in 1u32..32) {
            let score = ImageQualityGate::new().assess(&create_test_image(w, h, value));
            prop_assert!(score.is_bright);
        }
    }
}
