use image::{GrayImage, Luma, RgbaImage};

use super::error::ImageError;

/// 拍摄得到的海报图像（RGBA 格式，只读）
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>, // RGBA 格式
}

impl CapturedImage {
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ImageError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// 从 PNG/JPEG/BMP 编码数据解码
    pub fn from_encoded(bytes: &[u8]) -> Result<Self, ImageError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self::from_rgba_image(rgba))
    }

    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// Per-pixel brightness in raster order: plain average of R, G and B.
    pub fn brightness(&self) -> impl Iterator<Item = f32> + '_ {
        self.data
            .chunks_exact(4)
            .map(|rgba| (rgba[0] as f32 + rgba[1] as f32 + rgba[2] as f32) / 3.0)
    }

    /// 二值化：灰度化后以阈值切分为纯黑/纯白，逐像素处理
    ///
    /// 灰度值先四舍五入为 u8，再与阈值比较
    pub fn binarize(&self, threshold: u8) -> GrayImage {
        let mut out = GrayImage::new(self.width, self.height);
        for (pixel, value) in out.pixels_mut().zip(self.brightness()) {
            let gray = value.round() as u8;
            *pixel = Luma([if gray < threshold { 0 } else { 255 }]);
        }
        out
    }
}
