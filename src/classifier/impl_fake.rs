use crate::classifier::interface::{ClassifierModel, InferenceBackend, ModelLoader, ModelProfile};
use crate::classifier::model_uri::ModelUri;
use crate::error::PipelineError;
use crate::frame_normalizer::tensor::NormalizedTensor;
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::sync::{mpsc, Arc, Mutex, PoisonError};

#[derive(Debug, Clone)]
pub enum FakeScores {
    Fixed(Vec<f32>),
    Random { classes: usize },
}

pub struct InferenceBackendFake {
    scores: FakeScores,
}

impl InferenceBackendFake {
    pub fn new(scores: FakeScores) -> Self {
        Self { scores }
    }
}

impl InferenceBackend for InferenceBackendFake {
    fn scores(&self, _tensor: &NormalizedTensor) -> Result<Vec<f32>, PipelineError> {
        match &self.scores {
            FakeScores::Fixed(scores) => Ok(scores.clone()),
            FakeScores::Random { classes } => {
                let mut rng = rand::rng();
                let distribution = Uniform::new(0.0f32, 1.0)
                    .map_err(|e| PipelineError::Inference(e.to_string()))?;
                Ok((0..*classes)
                    .map(|_| distribution.sample(&mut rng))
                    .collect())
            }
        }
    }
}

/// Loader that hands out an in-memory model, optionally failing or waiting
/// for a release signal first.
pub struct ModelLoaderFake {
    logger: Arc<dyn Logger + Send + Sync>,
    profile: ModelProfile,
    scores: FakeScores,
    failure: Option<String>,
    gate: Mutex<Option<mpsc::Receiver<()>>>,
}

impl ModelLoaderFake {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        profile: ModelProfile,
        scores: FakeScores,
    ) -> Self {
        Self {
            logger: logger.with_namespace("fake"),
            profile,
            scores,
            failure: None,
            gate: Mutex::new(None),
        }
    }

    pub fn failing(mut self, reason: &str) -> Self {
        self.failure = Some(reason.to_string());
        self
    }

    /// Holds the next load in `Loading` until the returned sender fires or drops.
    pub fn gated(self) -> (Self, mpsc::Sender<()>) {
        let (release_tx, release_rx) = mpsc::channel();
        *self.gate.lock().unwrap_or_else(PoisonError::into_inner) = Some(release_rx);
        (self, release_tx)
    }
}

impl ModelLoader for ModelLoaderFake {
    fn load(&self, uri: &ModelUri) -> Result<ClassifierModel, PipelineError> {
        let _ = self.logger.info(&format!("Loading fake model for {}", uri));

        let gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(gate) = gate {
            let _ = gate.recv();
        }

        if let Some(reason) = &self.failure {
            return Err(PipelineError::ModelLoad(reason.clone()));
        }

        ClassifierModel::bind(
            self.profile.clone(),
            Box::new(InferenceBackendFake::new(self.scores.clone())),
        )
    }
}
