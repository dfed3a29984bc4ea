use crate::error::PipelineError;
use image::RgbImage;
use std::sync::{mpsc, Arc};

/// Read-only snapshot of the camera's most recent image.
#[derive(Debug, Clone)]
pub struct LiveFrame {
    image: Arc<RgbImage>,
}

impl LiveFrame {
    pub fn new(image: RgbImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameSourceEvent {
    Connected,
    Disconnected,
}

pub trait FrameSource: Send + Sync {
    /// Requests the camera stream. Fails with `SourceUnavailable` when access is refused.
    fn start(&self) -> Result<(), PipelineError>;
    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    /// Latest delivered frame; `NotReady` before the first one arrives.
    fn acquire(&self) -> Result<LiveFrame, PipelineError>;
    fn events(&self) -> mpsc::Receiver<FrameSourceEvent>;
}
