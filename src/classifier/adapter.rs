use crate::classifier::interface::{ClassIndex, ClassifierModel, ModelLoader, ModelProfile};
use crate::classifier::model_uri::ModelUri;
use crate::error::{Component, PipelineError};
use crate::frame_normalizer::tensor::NormalizedTensor;
use crate::library::logger::interface::Logger;
use std::sync::{mpsc, Arc, PoisonError, RwLock};

enum ClassifierState {
    Uninitialized,
    Loading,
    Ready(Arc<ClassifierModel>),
    Failed(PipelineError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierStatus {
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

/// Owns the model handle and its single-shot load:
/// `Uninitialized -> Loading -> Ready | Failed`.
pub struct ClassifierAdapter {
    loader: Arc<dyn ModelLoader>,
    state: Arc<RwLock<ClassifierState>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ClassifierAdapter {
    pub fn new(loader: Arc<dyn ModelLoader>, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            loader,
            state: Arc::new(RwLock::new(ClassifierState::Uninitialized)),
            logger: logger.with_namespace("classifier"),
        }
    }

    /// Starts loading on a worker thread. The receiver yields exactly one
    /// outcome once the adapter has left `Loading`.
    pub fn load(
        &self,
        uri: ModelUri,
    ) -> Result<mpsc::Receiver<Result<ModelProfile, PipelineError>>, PipelineError> {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if !matches!(*state, ClassifierState::Uninitialized) {
                return Err(PipelineError::LoadAlreadyStarted);
            }
            *state = ClassifierState::Loading;
        }

        let _ = self.logger.info(&format!("Loading model from {}", uri));

        let (tx, rx) = mpsc::channel();
        let loader = self.loader.clone();
        let state = self.state.clone();
        let logger = self.logger.clone();

        std::thread::spawn(move || {
            let outcome = match loader.load(&uri) {
                Ok(model) => {
                    let profile = model.profile().clone();
                    let _ = logger.info(&format!(
                        "Model {} ready: input {}x{}, divisor {}, {} classes",
                        profile.name,
                        profile.input_side,
                        profile.input_side,
                        profile.divisor,
                        profile.class_table.len()
                    ));
                    *state.write().unwrap_or_else(PoisonError::into_inner) =
                        ClassifierState::Ready(Arc::new(model));
                    Ok(profile)
                }
                Err(e) => {
                    let _ = logger.error(&e.to_string());
                    *state.write().unwrap_or_else(PoisonError::into_inner) =
                        ClassifierState::Failed(e.clone());
                    Err(e)
                }
            };
            let _ = tx.send(outcome);
        });

        Ok(rx)
    }

    pub fn load_blocking(&self, uri: ModelUri) -> Result<ModelProfile, PipelineError> {
        self.load(uri)?
            .recv()
            .map_err(|_| PipelineError::ModelLoad("loader thread exited".to_string()))?
    }

    pub fn status(&self) -> ClassifierStatus {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            ClassifierState::Uninitialized => ClassifierStatus::Uninitialized,
            ClassifierState::Loading => ClassifierStatus::Loading,
            ClassifierState::Ready(_) => ClassifierStatus::Ready,
            ClassifierState::Failed(_) => ClassifierStatus::Failed,
        }
    }

    /// Load failure, if the adapter ended in `Failed`.
    pub fn failure(&self) -> Option<PipelineError> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            ClassifierState::Failed(e) => Some(e.clone()),
            _ => None,
        }
    }

    pub fn model(&self) -> Result<Arc<ClassifierModel>, PipelineError> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            ClassifierState::Ready(model) => Ok(model.clone()),
            _ => Err(PipelineError::NotReady(Component::Classifier)),
        }
    }

    pub fn predict(&self, tensor: &NormalizedTensor) -> Result<ClassIndex, PipelineError> {
        self.model()?.predict(tensor)
    }
}
