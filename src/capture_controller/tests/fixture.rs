use crate::capture_controller::CaptureController;
use crate::classifier::adapter::ClassifierAdapter;
use crate::classifier::impl_fake::{FakeScores, ModelLoaderFake};
use crate::classifier::interface::ModelProfile;
use crate::classifier::model_uri::ModelUri;
use crate::config::Config;
use crate::frame_normalizer::FrameNormalizer;
use crate::frame_source::impl_fake::FrameSourceFake;
use crate::label_decoder::class_table::ClassTable;
use crate::library::logger::{impl_console::LoggerConsole, interface::Logger};
use crate::presenter::impl_fake::PresenterFake;
use std::sync::{Arc, Mutex};

pub fn profile() -> ModelProfile {
    ModelProfile {
        name: "asl-29".to_string(),
        input_side: 100,
        divisor: 255.0,
        class_table: ClassTable::letters_with_controls(),
    }
}

/// Scores peaking at `peak` over the 29-class table.
pub fn peaked_at(peak: usize) -> FakeScores {
    FakeScores::Fixed((0..29).map(|i| if i == peak { 0.8 } else { 0.01 }).collect())
}

pub struct Fixture {
    pub frame_source: Arc<FrameSourceFake>,
    pub classifier: Arc<ClassifierAdapter>,
    pub presenter: PresenterFake,
    pub controller: Arc<CaptureController>,
}

impl Fixture {
    /// Camera and model not started yet.
    pub fn idle(frame_source: FrameSourceFake, loader: ModelLoaderFake) -> Self {
        let config = Config::default();
        let logger = Self::logger();
        let frame_source = Arc::new(frame_source);
        let classifier = Arc::new(ClassifierAdapter::new(Arc::new(loader), logger.clone()));
        let presenter = PresenterFake::new();
        let controller = Arc::new(CaptureController::new(
            frame_source.clone(),
            classifier.clone(),
            FrameNormalizer::new(config.canvas_side, config.canvas_background),
            Arc::new(Mutex::new(presenter.clone())),
            logger.clone(),
        ));

        Self {
            frame_source,
            classifier,
            presenter,
            controller,
        }
    }

    pub fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(Config::default().logger_timezone))
    }

    pub fn loader(scores: FakeScores) -> ModelLoaderFake {
        ModelLoaderFake::new(Self::logger(), profile(), scores)
    }

    /// Camera streaming a 640x480 frame, model loaded and predicting `peak`.
    pub fn ready(peak: usize) -> Self {
        let f = Self::idle(
            FrameSourceFake::new(Self::logger(), 640, 480),
            Self::loader(peaked_at(peak)),
        );
        f.start_camera();
        f.load_model();
        f
    }

    pub fn start_camera(&self) {
        use crate::frame_source::interface::FrameSource;
        self.frame_source.start().unwrap();
    }

    pub fn load_model(&self) {
        self.classifier
            .load_blocking(ModelUri::new("asl_model/model.json"))
            .unwrap();
    }
}
