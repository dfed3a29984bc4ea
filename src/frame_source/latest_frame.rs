use crate::error::{Component, PipelineError};
use crate::frame_source::interface::{FrameSourceEvent, LiveFrame};
use std::sync::{mpsc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Default)]
enum SlotState {
    #[default]
    NotReady,
    Streaming(LiveFrame),
    Revoked(String),
}

/// Single-slot holder for the newest frame a camera delivered. Frames are
/// replaced, never queued.
#[derive(Debug, Default)]
pub struct LatestFrame {
    state: Mutex<SlotState>,
    subscribers: Mutex<Vec<mpsc::Sender<FrameSourceEvent>>>,
}

impl LatestFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, frame: LiveFrame) {
        let mut subscribers = self.subscribers();
        let was_streaming = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let was_streaming = matches!(*state, SlotState::Streaming(_));
            *state = SlotState::Streaming(frame);
            was_streaming
        };

        if !was_streaming {
            notify(&mut subscribers, FrameSourceEvent::Connected);
        }
    }

    pub fn revoke(&self, reason: &str) {
        let mut subscribers = self.subscribers();
        let was_streaming = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let was_streaming = matches!(*state, SlotState::Streaming(_));
            *state = SlotState::Revoked(reason.to_string());
            was_streaming
        };

        if was_streaming {
            notify(&mut subscribers, FrameSourceEvent::Disconnected);
        }
    }

    pub fn acquire(&self) -> Result<LiveFrame, PipelineError> {
        match &*self.state.lock().unwrap_or_else(PoisonError::into_inner) {
            SlotState::NotReady => Err(PipelineError::NotReady(Component::FrameSource)),
            SlotState::Streaming(frame) => Ok(frame.clone()),
            SlotState::Revoked(reason) => Err(PipelineError::SourceUnavailable(reason.clone())),
        }
    }

    /// Subscribers that join after the first frame are told `Connected` right away.
    pub fn subscribe(&self) -> mpsc::Receiver<FrameSourceEvent> {
        let (tx, rx) = mpsc::channel();
        let mut subscribers = self.subscribers();

        let streaming = matches!(
            *self.state.lock().unwrap_or_else(PoisonError::into_inner),
            SlotState::Streaming(_)
        );
        if streaming {
            let _ = tx.send(FrameSourceEvent::Connected);
        }

        subscribers.push(tx);
        rx
    }

    // Always taken before `state`.
    fn subscribers(&self) -> MutexGuard<'_, Vec<mpsc::Sender<FrameSourceEvent>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn notify(subscribers: &mut Vec<mpsc::Sender<FrameSourceEvent>>, event: FrameSourceEvent) {
    subscribers.retain(|subscriber| subscriber.send(event.clone()).is_ok());
}
