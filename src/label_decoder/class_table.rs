use crate::error::PipelineError;
use crate::label_decoder::label::Label;
use std::collections::HashSet;
use std::sync::Arc;

const CONTROL_TOKENS: [Label; 3] = [Label::Delete, Label::Nothing, Label::Space];

/// Immutable, ordered class index -> label table bound to one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTable {
    labels: Arc<[Label]>,
}

impl ClassTable {
    pub fn new(labels: Vec<Label>) -> Result<Self, PipelineError> {
        if labels.is_empty() {
            return Err(PipelineError::ModelLoad("class table is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for label in &labels {
            if !seen.insert(*label) {
                return Err(PipelineError::ModelLoad(format!(
                    "class table lists {} more than once",
                    label
                )));
            }
        }

        Ok(Self {
            labels: labels.into(),
        })
    }

    /// The 26 letters A-Z.
    pub fn letters() -> Self {
        Self {
            labels: ('A'..='Z').map(Label::Letter).collect(),
        }
    }

    /// The 26 letters followed by `del`, `nothing`, `space`.
    pub fn letters_with_controls() -> Self {
        Self {
            labels: ('A'..='Z')
                .map(Label::Letter)
                .chain(CONTROL_TOKENS)
                .collect(),
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "letters" => Some(Self::letters()),
            "letters_with_controls" => Some(Self::letters_with_controls()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}
