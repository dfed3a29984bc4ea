use thiserror::Error;

/// Pipeline dependency that has not become ready yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    FrameSource,
    Classifier,
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Component::FrameSource => write!(f, "frame source"),
            Component::Classifier => write!(f, "classifier"),
        }
    }
}

/// Every failure a capture cycle (or the startup that precedes it) can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("camera unavailable: {0}")]
    SourceUnavailable(String),

    #[error("invalid frame {width}x{height}")]
    InvalidFrame { width: u32, height: u32 },

    #[error("model load failed: {0}")]
    ModelLoad(String),

    #[error("{0} not ready")]
    NotReady(Component),

    #[error("class index {index} out of range for {len} labels")]
    OutOfRange { index: usize, len: usize },

    #[error("capture already in flight")]
    Busy,

    #[error("tensor side {actual} does not match model input side {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("model load already started")]
    LoadAlreadyStarted,
}
