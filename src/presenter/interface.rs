use crate::error::PipelineError;
use crate::label_decoder::label::Label;
use std::error::Error;
use std::sync::mpsc;

pub type CaptureResult = Result<Label, PipelineError>;

/// Where capture results are shown and capture requests come from.
pub trait Presenter: Send + Sync {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Pipeline readiness, e.g. "Loading model...".
    fn show_status(&mut self, status: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Called exactly once per capture cycle, with the label or the failure.
    fn show_result(&mut self, result: &CaptureResult) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// One message per user capture request. Closes when the user quits.
    fn triggers(&mut self) -> mpsc::Receiver<()>;
}

pub fn describe(result: &CaptureResult) -> String {
    match result {
        Ok(label) => format!("Predicted sign: {}", label),
        Err(e) => format!("Capture failed: {}", e),
    }
}
