use crate::error::PipelineError;
use crate::frame_source::interface::{FrameSource, FrameSourceEvent, LiveFrame};
use crate::frame_source::latest_frame::LatestFrame;
use crate::library::logger::interface::Logger;
use image::{Rgb, RgbImage};
use std::sync::{mpsc, Arc, Mutex, PoisonError};

struct AcquireHold {
    entered: mpsc::Sender<()>,
    release: mpsc::Receiver<()>,
}

/// Camera stand-in that delivers one synthetic frame when started.
pub struct FrameSourceFake {
    logger: Arc<dyn Logger + Send + Sync>,
    slot: LatestFrame,
    image: RgbImage,
    permission_granted: bool,
    hold: Mutex<Option<AcquireHold>>,
}

impl FrameSourceFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, width: u32, height: u32) -> Self {
        Self::with_image(logger, gradient(width, height))
    }

    pub fn with_image(logger: Arc<dyn Logger + Send + Sync>, image: RgbImage) -> Self {
        Self {
            logger: logger.with_namespace("frame_source").with_namespace("fake"),
            slot: LatestFrame::new(),
            image,
            permission_granted: true,
            hold: Mutex::new(None),
        }
    }

    /// A camera the user never granted access to.
    pub fn denied(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            permission_granted: false,
            ..Self::new(logger, 640, 480)
        }
    }

    pub fn disconnect(&self) {
        let _ = self.logger.info("Camera disconnected");
        self.slot.revoke("device disconnected");
    }

    /// Makes the next `acquire` signal `entered` and block until `release` fires.
    pub fn hold_next_acquire(&self) -> (mpsc::Receiver<()>, mpsc::Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        *self.hold.lock().unwrap_or_else(PoisonError::into_inner) = Some(AcquireHold {
            entered: entered_tx,
            release: release_rx,
        });
        (entered_rx, release_tx)
    }
}

impl FrameSource for FrameSourceFake {
    fn start(&self) -> Result<(), PipelineError> {
        if !self.permission_granted {
            let _ = self.logger.error("Camera permission denied");
            self.slot.revoke("permission denied");
            return Err(PipelineError::SourceUnavailable(
                "permission denied".to_string(),
            ));
        }

        let _ = self.logger.info(&format!(
            "Camera started at {}x{}",
            self.image.width(),
            self.image.height()
        ));
        self.slot.publish(LiveFrame::new(self.image.clone()));
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Camera stopped")?;
        self.slot.revoke("camera stopped");
        Ok(())
    }

    fn acquire(&self) -> Result<LiveFrame, PipelineError> {
        let hold = self
            .hold
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(hold) = hold {
            let _ = hold.entered.send(());
            let _ = hold.release.recv();
        }

        self.slot.acquire()
    }

    fn events(&self) -> mpsc::Receiver<FrameSourceEvent> {
        self.slot.subscribe()
    }
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    })
}
