use std::path::{Path, PathBuf};

use crate::error::{ExtractError, Result};

const PROJECT_EXTENSION: &str = "cst";

/// Locates the result exports that belong to a `.cst` project file.
///
/// A project `foo.cst` keeps its data in a sibling `foo/` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    file: PathBuf,
}

impl Project {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != PROJECT_EXTENSION {
            return Err(ExtractError::invalid(path, "not a .cst project file"));
        }
        if !path.is_file() {
            return Err(ExtractError::NotFound(path.to_path_buf()));
        }
        Ok(Project {
            file: path.to_path_buf(),
        })
    }

    pub fn name(&self) -> &str {
        self.file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn project_dir(&self) -> PathBuf {
        let parent = self.file.parent().unwrap_or_else(|| Path::new(""));
        parent.join(self.file.file_stem().unwrap_or_default())
    }

    pub fn model_dir(&self) -> PathBuf {
        self.project_dir().join("Model")
    }

    pub fn result_dir(&self) -> PathBuf {
        self.project_dir().join("Result")
    }

    /// Result directory file of the 3D model.
    pub fn model_res(&self) -> PathBuf {
        self.result_dir().join("Model.res")
    }

    pub fn ds_result_dir(&self) -> PathBuf {
        self.result_dir().join("DS")
    }

    /// Result directory file of the schematic.
    pub fn ds_model_res(&self) -> PathBuf {
        self.ds_result_dir().join("Model.res")
    }
}
