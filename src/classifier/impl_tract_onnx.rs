use crate::classifier::interface::{ClassifierModel, InferenceBackend, ModelLoader};
use crate::classifier::manifest::ModelManifest;
use crate::classifier::model_uri::ModelUri;
use crate::error::PipelineError;
use crate::frame_normalizer::tensor::NormalizedTensor;
use crate::library::logger::interface::Logger;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tract_onnx::prelude::*;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

pub struct InferenceBackendTract {
    plan: Plan,
}

impl InferenceBackendTract {
    /// Builds a runnable plan whose single input is fixed to `[1, side, side, 3]` f32.
    pub fn from_path(weights: &Path, side: usize) -> Result<Self, PipelineError> {
        let plan = tract_onnx::onnx()
            .model_for_path(weights)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, side, side, 3]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| PipelineError::ModelLoad(format!("{}: {}", weights.display(), e)))?;

        Ok(Self { plan })
    }
}

impl InferenceBackend for InferenceBackendTract {
    fn scores(&self, tensor: &NormalizedTensor) -> Result<Vec<f32>, PipelineError> {
        let inference = |e: TractError| PipelineError::Inference(e.to_string());

        let outputs = self
            .plan
            .run(tvec!(tensor.to_tract().into_tvalue()))
            .map_err(inference)?;
        let output = outputs
            .first()
            .ok_or_else(|| PipelineError::Inference("model produced no outputs".to_string()))?;
        let scores = output.to_array_view::<f32>().map_err(inference)?;

        Ok(scores.iter().copied().collect())
    }
}

/// Loads `manifest.json` + ONNX weights pairs with tract.
pub struct ModelLoaderTract {
    logger: Arc<dyn Logger + Send + Sync>,
    base_dir: PathBuf,
}

impl ModelLoaderTract {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, base_dir: PathBuf) -> Self {
        Self {
            logger: logger.with_namespace("tract"),
            base_dir,
        }
    }
}

impl ModelLoader for ModelLoaderTract {
    fn load(&self, uri: &ModelUri) -> Result<ClassifierModel, PipelineError> {
        let manifest_path = uri.resolve(&self.base_dir)?;
        let manifest = ModelManifest::read(&manifest_path)?;
        let profile = manifest.profile()?;
        let weights = manifest.weights_path(&manifest_path);

        let _ = self.logger.info(&format!(
            "Reading weights {} for a {}x{} input",
            weights.display(),
            profile.input_side,
            profile.input_side
        ));

        let backend = InferenceBackendTract::from_path(&weights, profile.input_side)?;
        ClassifierModel::bind(profile, Box::new(backend))
    }
}
