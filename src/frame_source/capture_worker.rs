use crate::error::PipelineError;
use std::sync::mpsc;
use std::thread::JoinHandle;

/// Lets a capture thread tell `start` whether streaming actually began.
pub struct StartupSignal(mpsc::Sender<Result<(), PipelineError>>);

impl StartupSignal {
    pub fn report(self, outcome: Result<(), PipelineError>) {
        let _ = self.0.send(outcome);
    }
}

/// Spawns `body` and blocks until it reports through its `StartupSignal`.
/// A body that fails, or returns without reporting, is joined and its
/// failure returned as `SourceUnavailable`.
pub fn spawn_capture_worker<F>(body: F) -> Result<JoinHandle<()>, PipelineError>
where
    F: FnOnce(StartupSignal) + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let handle = std::thread::spawn(move || body(StartupSignal(tx)));

    match rx.recv() {
        Ok(Ok(())) => Ok(handle),
        Ok(Err(e)) => {
            let _ = handle.join();
            Err(e)
        }
        Err(_) => {
            let _ = handle.join();
            Err(PipelineError::SourceUnavailable(
                "capture stopped before the first frame".to_string(),
            ))
        }
    }
}
