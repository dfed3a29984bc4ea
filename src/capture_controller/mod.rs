use crate::classifier::adapter::ClassifierAdapter;
use crate::error::PipelineError;
use crate::frame_normalizer::FrameNormalizer;
use crate::frame_source::interface::FrameSource;
use crate::label_decoder::decode;
use crate::library::logger::interface::Logger;
use crate::presenter::interface::{describe, CaptureResult, Presenter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

#[cfg(test)]
pub(crate) mod tests;

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Runs one capture -> normalize -> predict -> decode cycle per trigger and
/// emits the outcome to the presenter. Cycles never overlap.
pub struct CaptureController {
    frame_source: Arc<dyn FrameSource>,
    classifier: Arc<ClassifierAdapter>,
    normalizer: FrameNormalizer,
    presenter: Arc<Mutex<dyn Presenter + Send + Sync>>,
    in_flight: AtomicBool,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl CaptureController {
    pub fn new(
        frame_source: Arc<dyn FrameSource>,
        classifier: Arc<ClassifierAdapter>,
        normalizer: FrameNormalizer,
        presenter: Arc<Mutex<dyn Presenter + Send + Sync>>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            frame_source,
            classifier,
            normalizer,
            presenter,
            in_flight: AtomicBool::new(false),
            logger: logger.with_namespace("capture_controller"),
        }
    }

    pub fn trigger(&self) -> CaptureResult {
        let _in_flight = match self.begin() {
            Ok(guard) => guard,
            Err(e) => {
                self.emit(&Err(e.clone()));
                return Err(e);
            }
        };

        let result = self.run_cycle();
        self.emit(&result);
        result
    }

    /// Reports a trigger that was refused before a cycle could start.
    pub fn reject(&self, reason: PipelineError) -> CaptureResult {
        let result = Err(reason);
        self.emit(&result);
        result
    }

    fn begin(&self) -> Result<InFlight<'_>, PipelineError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| InFlight(&self.in_flight))
            .map_err(|_| PipelineError::Busy)
    }

    fn run_cycle(&self) -> CaptureResult {
        let model = self.classifier.model()?;
        let frame = self.frame_source.acquire()?;
        let profile = model.profile();

        let tensor = self.normalizer.normalize(&frame, profile)?;
        let index = model.predict(&tensor)?;
        decode(index, &profile.class_table)
    }

    fn emit(&self, result: &CaptureResult) {
        let _ = match result {
            Ok(_) => self.logger.info(&describe(result)),
            Err(_) => self.logger.error(&describe(result)),
        };

        if let Err(e) = self
            .presenter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .show_result(result)
        {
            let _ = self.logger.error(&format!("Presenter failed: {}", e));
        }
    }
}
