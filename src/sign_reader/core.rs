use crate::classifier::interface::ModelProfile;
use crate::error::{Component, PipelineError};
use crate::frame_source::interface::FrameSourceEvent;
use crate::presenter::interface::CaptureResult;

#[derive(Debug, Clone, PartialEq)]
pub enum CameraState {
    Pending,
    Started,
    Streaming,
    Unavailable(PipelineError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelState {
    Loading,
    Loaded(ModelProfile),
}

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    Starting {
        camera: CameraState,
        model: ModelState,
    },
    Ready {
        profile: ModelProfile,
    },
    Unavailable {
        reason: PipelineError,
    },
}

#[derive(Debug)]
pub enum Event {
    CameraStartDone(Result<(), PipelineError>),
    CameraEvent(FrameSourceEvent),
    ModelLoadDone(Result<ModelProfile, PipelineError>),
    CaptureRequested,
    CaptureDone(CaptureResult),
    TriggersClosed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SubscribeToCameraEvents,
    SubscribeToTriggers,
    StartCamera,
    LoadModel,
    RunCapture,
    RejectCapture(PipelineError),
}

pub fn init() -> (State, Vec<Effect>) {
    (
        State::Starting {
            camera: CameraState::Pending,
            model: ModelState::Loading,
        },
        vec![
            Effect::SubscribeToCameraEvents,
            Effect::SubscribeToTriggers,
            Effect::StartCamera,
            Effect::LoadModel,
        ],
    )
}

/// Leaves `Starting` only once the camera streams and the model is loaded.
fn settle(camera: CameraState, model: ModelState) -> State {
    match (camera, model) {
        (CameraState::Streaming, ModelState::Loaded(profile)) => State::Ready { profile },
        (camera, model) => State::Starting { camera, model },
    }
}

fn not_ready_reason(camera: &CameraState, model: &ModelState) -> PipelineError {
    match (camera, model) {
        (CameraState::Unavailable(reason), _) => reason.clone(),
        (_, ModelState::Loading) => PipelineError::NotReady(Component::Classifier),
        _ => PipelineError::NotReady(Component::FrameSource),
    }
}

pub fn transition(state: State, event: Event) -> (State, Vec<Effect>) {
    match (state, event) {
        // Startup: camera and model resolve independently, in either order
        (State::Starting { camera, model }, Event::CameraStartDone(Ok(()))) => {
            let camera = match camera {
                CameraState::Streaming => CameraState::Streaming,
                _ => CameraState::Started,
            };
            (settle(camera, model), vec![])
        }
        (State::Starting { model, .. }, Event::CameraStartDone(Err(reason))) => (
            State::Starting {
                camera: CameraState::Unavailable(reason),
                model,
            },
            vec![],
        ),
        (State::Starting { model, .. }, Event::CameraEvent(FrameSourceEvent::Connected)) => {
            (settle(CameraState::Streaming, model), vec![])
        }
        (State::Starting { camera, .. }, Event::ModelLoadDone(Ok(profile))) => {
            (settle(camera, ModelState::Loaded(profile)), vec![])
        }
        (_, Event::ModelLoadDone(Err(reason))) => (State::Unavailable { reason }, vec![]),

        // Camera loss keeps the loaded model and waits for the stream to return
        (State::Ready { profile }, Event::CameraEvent(FrameSourceEvent::Disconnected)) => (
            State::Starting {
                camera: CameraState::Unavailable(PipelineError::SourceUnavailable(
                    "camera disconnected".to_string(),
                )),
                model: ModelState::Loaded(profile),
            },
            vec![],
        ),
        (State::Starting { model, .. }, Event::CameraEvent(FrameSourceEvent::Disconnected)) => (
            State::Starting {
                camera: CameraState::Unavailable(PipelineError::SourceUnavailable(
                    "camera disconnected".to_string(),
                )),
                model,
            },
            vec![],
        ),

        // Triggers
        (State::Ready { profile }, Event::CaptureRequested) => {
            (State::Ready { profile }, vec![Effect::RunCapture])
        }
        (State::Starting { camera, model }, Event::CaptureRequested) => {
            let reason = not_ready_reason(&camera, &model);
            (
                State::Starting { camera, model },
                vec![Effect::RejectCapture(reason)],
            )
        }
        (State::Unavailable { reason }, Event::CaptureRequested) => {
            let effects = vec![Effect::RejectCapture(reason.clone())];
            (State::Unavailable { reason }, effects)
        }

        // Default case
        (state, _) => (state, vec![]),
    }
}
