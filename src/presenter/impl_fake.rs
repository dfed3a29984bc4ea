use crate::presenter::interface::{CaptureResult, Presenter};
use std::error::Error;
use std::sync::{mpsc, Arc, Mutex, PoisonError};

#[derive(Default)]
struct Recorded {
    statuses: Vec<String>,
    results: Vec<CaptureResult>,
}

/// Records everything shown; clones share the same recording and trigger channel.
#[derive(Clone)]
pub struct PresenterFake {
    recorded: Arc<Mutex<Recorded>>,
    trigger_sender: Arc<Mutex<Option<mpsc::Sender<()>>>>,
    trigger_receiver: Arc<Mutex<Option<mpsc::Receiver<()>>>>,
}

impl PresenterFake {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            recorded: Arc::new(Mutex::new(Recorded::default())),
            trigger_sender: Arc::new(Mutex::new(Some(tx))),
            trigger_receiver: Arc::new(Mutex::new(Some(rx))),
        }
    }

    pub fn press_capture(&self) {
        if let Some(sender) = &*self.trigger_sender.lock().unwrap_or_else(PoisonError::into_inner) {
            let _ = sender.send(());
        }
    }

    /// Closes the trigger channel, as a user quitting would.
    pub fn quit(&self) {
        self.trigger_sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    pub fn statuses(&self) -> Vec<String> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .statuses
            .clone()
    }

    pub fn results(&self) -> Vec<CaptureResult> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .results
            .clone()
    }
}

impl Presenter for PresenterFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn show_status(&mut self, status: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .statuses
            .push(status.to_string());
        Ok(())
    }

    fn show_result(&mut self, result: &CaptureResult) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .results
            .push(result.clone());
        Ok(())
    }

    fn triggers(&mut self) -> mpsc::Receiver<()> {
        match self
            .trigger_receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            Some(receiver) => receiver,
            None => mpsc::channel().1,
        }
    }
}
