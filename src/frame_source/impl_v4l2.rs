use crate::error::PipelineError;
use crate::frame_source::capture_worker::{spawn_capture_worker, StartupSignal};
use crate::frame_source::interface::{FrameSource, FrameSourceEvent, LiveFrame};
use crate::frame_source::latest_frame::LatestFrame;
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

#[derive(Debug, Clone)]
pub struct V4l2Config {
    pub device: String,
    pub width: u32,
    pub height: u32,
    pub buffer_count: u32,
}

/// Linux webcam streamed through V4L2 in MJPEG.
pub struct FrameSourceV4l2 {
    logger: Arc<dyn Logger + Send + Sync>,
    config: V4l2Config,
    slot: Arc<LatestFrame>,
    running: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl FrameSourceV4l2 {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, config: V4l2Config) -> Self {
        Self {
            logger: logger.with_namespace("frame_source").with_namespace("v4l2"),
            config,
            slot: Arc::new(LatestFrame::new()),
            running: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
        }
    }

    fn open(&self) -> Result<Device, PipelineError> {
        let unavailable =
            |e: std::io::Error| PipelineError::SourceUnavailable(format!("{}: {}", self.config.device, e));

        let device = Device::with_path(&self.config.device).map_err(unavailable)?;
        let format = Format::new(self.config.width, self.config.height, FourCC::new(b"MJPG"));
        let format = Capture::set_format(&device, &format).map_err(unavailable)?;

        if format.fourcc != FourCC::new(b"MJPG") {
            return Err(PipelineError::SourceUnavailable(
                "MJPEG format not supported by device".to_string(),
            ));
        }

        Ok(device)
    }

    /// Reports startup once the first frame is published, or the first
    /// failure before that, then keeps publishing until stopped.
    fn capture_loop(
        device: Device,
        config: V4l2Config,
        slot: Arc<LatestFrame>,
        running: Arc<AtomicBool>,
        logger: Arc<dyn Logger + Send + Sync>,
        startup: StartupSignal,
    ) {
        let mut stream =
            match MmapStream::with_buffers(&device, Type::VideoCapture, config.buffer_count) {
                Ok(stream) => stream,
                Err(e) => {
                    let reason = format!("{}: cannot map capture buffers: {}", config.device, e);
                    let _ = logger.error(&reason);
                    startup.report(Err(PipelineError::SourceUnavailable(reason)));
                    return;
                }
            };

        let mut startup = Some(startup);
        while running.load(Ordering::SeqCst) {
            match CaptureStream::next(&mut stream) {
                // the mmap buffer is only valid until the next call
                Ok((data, _metadata)) => match image::load_from_memory(data) {
                    Ok(decoded) => {
                        slot.publish(LiveFrame::new(decoded.to_rgb8()));
                        if let Some(startup) = startup.take() {
                            startup.report(Ok(()));
                        }
                    }
                    Err(e) => {
                        let _ = logger.error(&format!("Dropped undecodable frame: {}", e));
                    }
                },
                Err(e) => {
                    let reason = format!("{}: capture failed: {}", config.device, e);
                    let _ = logger.error(&reason);
                    slot.revoke(&reason);
                    if let Some(startup) = startup.take() {
                        startup.report(Err(PipelineError::SourceUnavailable(reason)));
                    }
                    return;
                }
            }
        }
    }
}

impl FrameSource for FrameSourceV4l2 {
    fn start(&self) -> Result<(), PipelineError> {
        let device = match self.open() {
            Ok(device) => device,
            Err(e) => {
                let _ = self.logger.error(&e.to_string());
                self.slot.revoke(&e.to_string());
                return Err(e);
            }
        };

        let _ = self.logger.info(&format!(
            "Opened {} at {}x{}, waiting for the first frame",
            self.config.device, self.config.width, self.config.height
        ));

        self.running.store(true, Ordering::SeqCst);
        let config = self.config.clone();
        let slot = self.slot.clone();
        let running = self.running.clone();
        let logger = self.logger.clone();
        let started = spawn_capture_worker(move |startup| {
            Self::capture_loop(device, config, slot, running, logger, startup);
        });

        match started {
            Ok(handle) => {
                *self.worker.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                self.slot.revoke(&e.to_string());
                Err(e)
            }
        }
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Stopping capture")?;
        self.running.store(false, Ordering::SeqCst);

        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }

        self.slot.revoke("camera stopped");
        Ok(())
    }

    fn acquire(&self) -> Result<LiveFrame, PipelineError> {
        self.slot.acquire()
    }

    fn events(&self) -> mpsc::Receiver<FrameSourceEvent> {
        self.slot.subscribe()
    }
}

impl Drop for FrameSourceV4l2 {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
