use image::{imageops, Rgb, RgbImage};

/// Placement of a source image inside a square staging canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fit {
    pub width: u32,
    pub height: u32,
    pub x_offset: u32,
    pub y_offset: u32,
}

/// Largest aspect-preserving size that fits `side x side`, centered.
pub fn fit_into_square(width: u32, height: u32, side: u32) -> Fit {
    let aspect = width as f64 / height as f64;

    let mut target_width = side as f64;
    let mut target_height = target_width / aspect;
    if target_height > side as f64 {
        target_height = side as f64;
        target_width = target_height * aspect;
    }

    let width = (target_width.round() as u32).clamp(1, side);
    let height = (target_height.round() as u32).clamp(1, side);

    Fit {
        width,
        height,
        x_offset: (side - width) / 2,
        y_offset: (side - height) / 2,
    }
}

/// Draws `image` onto a `side x side` canvas filled with `background`,
/// letterboxed or pillarboxed as needed.
pub fn stage(image: &RgbImage, side: u32, background: Rgb<u8>) -> RgbImage {
    let fit = fit_into_square(image.width(), image.height(), side);
    let scaled = imageops::resize(image, fit.width, fit.height, imageops::FilterType::Triangle);

    let mut canvas = RgbImage::from_pixel(side, side, background);
    imageops::overlay(
        &mut canvas,
        &scaled,
        fit.x_offset as i64,
        fit.y_offset as i64,
    );
    canvas
}

/// Nearest-neighbor resize with `src = floor(dst * in / out)` sampling
/// (no corner alignment, no half-pixel centers).
pub fn resize_nearest(image: &RgbImage, side: u32) -> RgbImage {
    let (width, height) = image.dimensions();

    RgbImage::from_fn(side, side, |x, y| {
        let source_x = (x as u64 * width as u64 / side as u64).min(width as u64 - 1) as u32;
        let source_y = (y as u64 * height as u64 / side as u64).min(height as u64 - 1) as u32;
        *image.get_pixel(source_x, source_y)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_landscape_is_letterboxed() {
        assert_eq!(
            fit_into_square(640, 480, 400),
            Fit {
                width: 400,
                height: 300,
                x_offset: 0,
                y_offset: 50
            }
        );
    }

    #[test]
    fn test_fit_portrait_is_pillarboxed() {
        assert_eq!(
            fit_into_square(480, 640, 400),
            Fit {
                width: 300,
                height: 400,
                x_offset: 50,
                y_offset: 0
            }
        );
    }

    #[test]
    fn test_fit_square_fills_canvas() {
        assert_eq!(
            fit_into_square(1080, 1080, 400),
            Fit {
                width: 400,
                height: 400,
                x_offset: 0,
                y_offset: 0
            }
        );
    }

    #[test]
    fn test_fit_keeps_extreme_aspect_visible() {
        let fit = fit_into_square(10_000, 1, 400);
        assert_eq!((fit.width, fit.height), (400, 1));
        assert_eq!(fit.y_offset, 199);
    }

    #[test]
    fn test_stage_fills_margins_with_background() {
        let image = RgbImage::from_pixel(200, 100, Rgb([255, 255, 255]));
        let staged = stage(&image, 400, Rgb([0, 0, 0]));

        assert_eq!(staged.dimensions(), (400, 400));
        assert_eq!(*staged.get_pixel(200, 10), Rgb([0, 0, 0]));
        assert_eq!(*staged.get_pixel(200, 390), Rgb([0, 0, 0]));
        assert_eq!(*staged.get_pixel(200, 200), Rgb([255, 255, 255]));
        assert_eq!(*staged.get_pixel(0, 200), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_resize_nearest_samples_floor_positions() {
        let image = RgbImage::from_fn(4, 4, |x, y| Rgb([x as u8, y as u8, 0]));
        let resized = resize_nearest(&image, 2);

        assert_eq!(*resized.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*resized.get_pixel(1, 0), Rgb([2, 0, 0]));
        assert_eq!(*resized.get_pixel(0, 1), Rgb([0, 2, 0]));
        assert_eq!(*resized.get_pixel(1, 1), Rgb([2, 2, 0]));
    }

    #[test]
    fn test_resize_nearest_upscales_by_repetition() {
        let image = RgbImage::from_fn(2, 2, |x, y| Rgb([x as u8 * 10, y as u8 * 10, 0]));
        let resized = resize_nearest(&image, 4);

        assert_eq!(*resized.get_pixel(1, 1), Rgb([0, 0, 0]));
        assert_eq!(*resized.get_pixel(2, 1), Rgb([10, 0, 0]));
        assert_eq!(*resized.get_pixel(3, 3), Rgb([10, 10, 0]));
    }
}
