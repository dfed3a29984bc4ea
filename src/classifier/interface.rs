use crate::classifier::model_uri::ModelUri;
use crate::error::PipelineError;
use crate::frame_normalizer::tensor::NormalizedTensor;
use crate::label_decoder::class_table::ClassTable;

/// Position in a model's output distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassIndex(pub usize);

/// Input contract and class table that travel with one model artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelProfile {
    pub name: String,
    pub input_side: usize,
    pub divisor: f32,
    pub class_table: ClassTable,
}

pub trait InferenceBackend: Send + Sync {
    /// Raw output scores for a batch of one.
    fn scores(&self, tensor: &NormalizedTensor) -> Result<Vec<f32>, PipelineError>;
}

pub trait ModelLoader: Send + Sync {
    fn load(&self, uri: &ModelUri) -> Result<ClassifierModel, PipelineError>;
}

/// Loaded model bound to its profile. Immutable once built.
pub struct ClassifierModel {
    profile: ModelProfile,
    backend: Box<dyn InferenceBackend>,
}

impl ClassifierModel {
    /// Binds a backend to a profile after checking, with one probe inference,
    /// that the output width equals the class table size.
    pub fn bind(
        profile: ModelProfile,
        backend: Box<dyn InferenceBackend>,
    ) -> Result<Self, PipelineError> {
        let probe = backend
            .scores(&NormalizedTensor::zeros(profile.input_side))
            .map_err(|e| PipelineError::ModelLoad(format!("probe inference failed: {}", e)))?;

        if probe.len() != profile.class_table.len() {
            return Err(PipelineError::ModelLoad(format!(
                "model {} outputs {} classes but its table has {} labels",
                profile.name,
                probe.len(),
                profile.class_table.len()
            )));
        }

        Ok(Self { profile, backend })
    }

    pub fn profile(&self) -> &ModelProfile {
        &self.profile
    }

    pub fn predict(&self, tensor: &NormalizedTensor) -> Result<ClassIndex, PipelineError> {
        if tensor.side() != self.profile.input_side {
            return Err(PipelineError::ShapeMismatch {
                expected: self.profile.input_side,
                actual: tensor.side(),
            });
        }

        let scores = self.backend.scores(tensor)?;
        if scores.len() != self.profile.class_table.len() {
            return Err(PipelineError::Inference(format!(
                "expected {} scores, got {}",
                self.profile.class_table.len(),
                scores.len()
            )));
        }

        argmax(&scores)
            .ok_or_else(|| PipelineError::Inference("output has no comparable scores".to_string()))
    }
}

/// Index of the highest score; ties go to the lowest index, NaN never wins.
pub fn argmax(scores: &[f32]) -> Option<ClassIndex> {
    scores
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (index, &score)| match best {
            _ if score.is_nan() => best,
            Some((_, top)) if score <= top => best,
            _ => Some((index, score)),
        })
        .map(|(index, _)| ClassIndex(index))
}
