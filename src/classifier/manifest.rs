use crate::classifier::interface::ModelProfile;
use crate::error::PipelineError;
use crate::label_decoder::class_table::ClassTable;
use crate::label_decoder::label::Label;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ClassesSpec {
    Preset(String),
    Explicit(Vec<String>),
}

/// Metadata half of a model artifact; `weights` names the binary half,
/// relative to the manifest's directory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelManifest {
    #[serde(default)]
    pub name: String,
    pub weights: String,
    pub input_side: usize,
    pub divisor: f32,
    pub classes: ClassesSpec,
}

impl ModelManifest {
    pub fn from_json(text: &str) -> Result<Self, PipelineError> {
        serde_json::from_str(text)
            .map_err(|e| PipelineError::ModelLoad(format!("malformed model manifest: {}", e)))
    }

    pub fn read(path: &Path) -> Result<Self, PipelineError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::ModelLoad(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn weights_path(&self, manifest_path: &Path) -> PathBuf {
        manifest_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&self.weights)
    }

    pub fn profile(&self) -> Result<ModelProfile, PipelineError> {
        if self.input_side == 0 {
            return Err(PipelineError::ModelLoad("input_side must be positive".to_string()));
        }
        if !(self.divisor.is_finite() && self.divisor > 0.0) {
            return Err(PipelineError::ModelLoad(format!(
                "divisor must be a positive number, got {}",
                self.divisor
            )));
        }

        let class_table = match &self.classes {
            ClassesSpec::Preset(name) => ClassTable::preset(name).ok_or_else(|| {
                PipelineError::ModelLoad(format!("unknown class preset {:?}", name))
            })?,
            ClassesSpec::Explicit(labels) => {
                let labels = labels
                    .iter()
                    .map(|label| label.parse::<Label>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(PipelineError::ModelLoad)?;
                ClassTable::new(labels)?
            }
        };

        Ok(ModelProfile {
            name: self.name.clone(),
            input_side: self.input_side,
            divisor: self.divisor,
            class_table,
        })
    }
}
