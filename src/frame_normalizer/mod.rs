pub mod letterbox;
pub mod tensor;

use crate::classifier::interface::ModelProfile;
use crate::error::PipelineError;
use crate::frame_source::interface::LiveFrame;
use image::Rgb;
use tensor::NormalizedTensor;

/// Turns a live frame into the tensor a model expects: letterbox onto a
/// `canvas_side` square, nearest-neighbor resize to the model's side, then
/// divide by the model's divisor.
#[derive(Debug, Clone)]
pub struct FrameNormalizer {
    canvas_side: u32,
    background: Rgb<u8>,
}

impl FrameNormalizer {
    pub fn new(canvas_side: u32, background: [u8; 3]) -> Self {
        Self {
            canvas_side,
            background: Rgb(background),
        }
    }

    pub fn normalize(
        &self,
        frame: &LiveFrame,
        profile: &ModelProfile,
    ) -> Result<NormalizedTensor, PipelineError> {
        if frame.width() == 0 || frame.height() == 0 {
            return Err(PipelineError::InvalidFrame {
                width: frame.width(),
                height: frame.height(),
            });
        }

        let staged = letterbox::stage(frame.image(), self.canvas_side, self.background);
        let resized = letterbox::resize_nearest(&staged, profile.input_side as u32);

        Ok(NormalizedTensor::from_image(&resized, profile.divisor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label_decoder::class_table::ClassTable;
    use image::RgbImage;

    fn profile(input_side: usize, divisor: f32) -> ModelProfile {
        ModelProfile {
            name: "test".to_string(),
            input_side,
            divisor,
            class_table: ClassTable::letters(),
        }
    }

    fn noisy_frame(width: u32, height: u32) -> LiveFrame {
        LiveFrame::new(RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 7 + y * 3) % 256) as u8,
                ((x * 13) % 256) as u8,
                if (x + y) % 2 == 0 { 255 } else { 0 },
            ])
        }))
    }

    #[test]
    fn test_normalize_shape_has_batch_of_one() {
        let normalizer = FrameNormalizer::new(400, [0, 0, 0]);
        let tensor = normalizer
            .normalize(&noisy_frame(640, 480), &profile(128, 255.0))
            .unwrap();

        assert_eq!(tensor.shape(), &[1, 128, 128, 3]);
        assert_eq!(tensor.side(), 128);
    }

    #[test]
    fn test_normalize_range_with_divisor_100() {
        let normalizer = FrameNormalizer::new(400, [0, 0, 0]);
        let tensor = normalizer
            .normalize(&noisy_frame(640, 480), &profile(100, 100.0))
            .unwrap();

        let max = tensor.values().fold(f32::MIN, f32::max);
        let min = tensor.values().fold(f32::MAX, f32::min);
        assert_eq!(tensor.shape(), &[1, 100, 100, 3]);
        assert!(max <= 2.55, "max was {}", max);
        assert!(min >= 0.0, "min was {}", min);
    }

    #[test]
    fn test_normalize_range_with_divisor_255() {
        let normalizer = FrameNormalizer::new(400, [0, 0, 0]);
        let frame = LiveFrame::new(RgbImage::from_pixel(64, 64, Rgb([255, 128, 0])));
        let tensor = normalizer.normalize(&frame, &profile(100, 255.0)).unwrap();

        assert_eq!(tensor.get(50, 50, 0), Some(1.0));
        assert!((tensor.get(50, 50, 1).unwrap() - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(tensor.get(50, 50, 2), Some(0.0));
    }

    #[test]
    fn test_landscape_frame_keeps_aspect_with_filled_margins() {
        // 2:1 white frame lands in rows 25..75 of a 100x100 tensor
        let normalizer = FrameNormalizer::new(400, [0, 0, 0]);
        let frame = LiveFrame::new(RgbImage::from_pixel(200, 100, Rgb([255, 255, 255])));
        let tensor = normalizer.normalize(&frame, &profile(100, 255.0)).unwrap();

        for x in [0, 50, 99] {
            assert_eq!(tensor.get(10, x, 0), Some(0.0));
            assert_eq!(tensor.get(24, x, 1), Some(0.0));
            assert!(tensor.get(25, x, 0).unwrap() > 0.99);
            assert!(tensor.get(50, x, 2).unwrap() > 0.99);
            assert!(tensor.get(74, x, 0).unwrap() > 0.99);
            assert_eq!(tensor.get(75, x, 0), Some(0.0));
            assert_eq!(tensor.get(90, x, 0), Some(0.0));
        }
    }

    #[test]
    fn test_portrait_frame_is_pillarboxed() {
        let normalizer = FrameNormalizer::new(400, [0, 0, 0]);
        let frame = LiveFrame::new(RgbImage::from_pixel(100, 200, Rgb([255, 255, 255])));
        let tensor = normalizer.normalize(&frame, &profile(100, 255.0)).unwrap();

        for y in [0, 50, 99] {
            assert_eq!(tensor.get(y, 10, 0), Some(0.0));
            assert!(tensor.get(y, 50, 0).unwrap() > 0.99);
            assert_eq!(tensor.get(y, 90, 0), Some(0.0));
        }
    }

    #[test]
    fn test_background_fill_is_configurable() {
        let normalizer = FrameNormalizer::new(400, [255, 0, 0]);
        let frame = LiveFrame::new(RgbImage::from_pixel(200, 100, Rgb([0, 0, 0])));
        let tensor = normalizer.normalize(&frame, &profile(100, 255.0)).unwrap();

        assert_eq!(tensor.get(5, 5, 0), Some(1.0));
        assert_eq!(tensor.get(50, 50, 0), Some(0.0));
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let normalizer = FrameNormalizer::new(400, [0, 0, 0]);
        let frame = noisy_frame(333, 211);
        let first = normalizer.normalize(&frame, &profile(100, 255.0)).unwrap();
        let second = normalizer.normalize(&frame, &profile(100, 255.0)).unwrap();

        assert!(first.values().eq(second.values()));
    }

    #[test]
    fn test_zero_sized_frame_is_invalid() {
        let normalizer = FrameNormalizer::new(400, [0, 0, 0]);

        for (width, height) in [(0, 480), (640, 0), (0, 0)] {
            let frame = LiveFrame::new(RgbImage::new(width, height));
            assert_eq!(
                normalizer.normalize(&frame, &profile(100, 100.0)).unwrap_err(),
                PipelineError::InvalidFrame { width, height }
            );
        }
    }
}
