use crate::error::PipelineError;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a model manifest lives: an absolute path, a path relative to the
/// loader's base directory, or a `file://` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelUri(String);

impl ModelUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn resolve(&self, base_dir: &Path) -> Result<PathBuf, PipelineError> {
        if let Some(path) = self.0.strip_prefix("file://") {
            if !path.starts_with('/') {
                return Err(PipelineError::ModelLoad(format!(
                    "file URI must hold an absolute path: {}",
                    self.0
                )));
            }
            return Ok(PathBuf::from(path));
        }

        if let Some((scheme, _)) = self.0.split_once("://") {
            return Err(PipelineError::ModelLoad(format!(
                "unsupported model URI scheme {:?}",
                scheme
            )));
        }

        if self.0.is_empty() {
            return Err(PipelineError::ModelLoad("empty model URI".to_string()));
        }

        let path = Path::new(&self.0);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(base_dir.join(path))
        }
    }
}

impl fmt::Display for ModelUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
