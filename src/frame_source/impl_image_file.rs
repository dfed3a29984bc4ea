use crate::error::PipelineError;
use crate::frame_source::interface::{FrameSource, FrameSourceEvent, LiveFrame};
use crate::frame_source::latest_frame::LatestFrame;
use crate::library::logger::interface::Logger;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};

/// Serves a still image from disk as the camera's latest frame.
pub struct FrameSourceImageFile {
    logger: Arc<dyn Logger + Send + Sync>,
    path: PathBuf,
    slot: LatestFrame,
}

impl FrameSourceImageFile {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, path: PathBuf) -> Self {
        Self {
            logger: logger.with_namespace("frame_source").with_namespace("image_file"),
            path,
            slot: LatestFrame::new(),
        }
    }
}

impl FrameSource for FrameSourceImageFile {
    fn start(&self) -> Result<(), PipelineError> {
        let image = match image::open(&self.path) {
            Ok(image) => image.to_rgb8(),
            Err(e) => {
                let reason = format!("{}: {}", self.path.display(), e);
                let _ = self.logger.error(&reason);
                self.slot.revoke(&reason);
                return Err(PipelineError::SourceUnavailable(reason));
            }
        };

        let _ = self.logger.info(&format!(
            "Loaded {} ({}x{})",
            self.path.display(),
            image.width(),
            image.height()
        ));
        self.slot.publish(LiveFrame::new(image));
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.slot.revoke("image source stopped");
        Ok(())
    }

    fn acquire(&self) -> Result<LiveFrame, PipelineError> {
        self.slot.acquire()
    }

    fn events(&self) -> mpsc::Receiver<FrameSourceEvent> {
        self.slot.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use chrono::{Offset, Utc};
    use image::{Rgb, RgbImage};

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(Utc.fix()))
    }

    #[test]
    fn test_serves_image_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "sign-capture-frame-{}.png",
            std::process::id()
        ));
        RgbImage::from_pixel(32, 24, Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let source = FrameSourceImageFile::new(logger(), path.clone());
        source.start().unwrap();
        let frame = source.acquire().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!((frame.width(), frame.height()), (32, 24));
        assert_eq!(*frame.image().get_pixel(5, 5), Rgb([10, 20, 30]));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let source = FrameSourceImageFile::new(logger(), PathBuf::from("/nonexistent/sign.png"));

        assert!(matches!(
            source.start(),
            Err(PipelineError::SourceUnavailable(_))
        ));
        assert!(matches!(
            source.acquire(),
            Err(PipelineError::SourceUnavailable(_))
        ));
    }
}
