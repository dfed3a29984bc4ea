use image::RgbImage;
use tract_onnx::prelude::*;

/// `[1, S, S, 3]` float input, channels last, values divided by the model's divisor.
#[derive(Debug, Clone)]
pub struct NormalizedTensor {
    data: tract_ndarray::Array4<f32>,
}

impl NormalizedTensor {
    pub fn from_image(image: &RgbImage, divisor: f32) -> Self {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let data = tract_ndarray::Array4::from_shape_fn((1, height, width, 3), |(_, y, x, c)| {
            image.get_pixel(x as u32, y as u32)[c] as f32 / divisor
        });
        Self { data }
    }

    pub fn zeros(side: usize) -> Self {
        Self {
            data: tract_ndarray::Array4::zeros((1, side, side, 3)),
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Side length S of the square input.
    pub fn side(&self) -> usize {
        self.data.shape()[1]
    }

    pub fn get(&self, y: usize, x: usize, channel: usize) -> Option<f32> {
        self.data.get([0, y, x, channel]).copied()
    }

    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().copied()
    }

    pub fn to_tract(&self) -> Tensor {
        self.data.clone().into_tensor()
    }
}
