use crate::presenter::interface::Presenter;
use crate::sign_reader::core::{CameraState, ModelState, State};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub struct Render {
    presenter: Arc<Mutex<dyn Presenter + Send + Sync>>,
}

impl Render {
    pub fn new(presenter: Arc<Mutex<dyn Presenter + Send + Sync>>) -> Self {
        Self { presenter }
    }

    pub fn render(&self, state: &State) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.presenter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .show_status(&status_line(state))
    }
}

pub fn status_line(state: &State) -> String {
    match state {
        State::Starting { camera, model } => {
            let camera = match camera {
                CameraState::Pending => "camera connecting...".to_string(),
                CameraState::Started => "camera waiting for first frame...".to_string(),
                CameraState::Streaming => "camera ready".to_string(),
                CameraState::Unavailable(reason) => reason.to_string(),
            };
            let model = match model {
                ModelState::Loading => "model loading...".to_string(),
                ModelState::Loaded(profile) => format!("model {} ready", profile.name),
            };
            format!("Starting: {}, {}", camera, model)
        }
        State::Ready { profile } => format!(
            "Ready: {} ({}x{}, {} classes)",
            profile.name,
            profile.input_side,
            profile.input_side,
            profile.class_table.len()
        ),
        State::Unavailable { reason } => format!("Unavailable: {}", reason),
    }
}
