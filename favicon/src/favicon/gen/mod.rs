use crate::favicon::FaviconError;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct OutputGenerator {
    outputs: BTreeMap<String, PathBuf>,
}

impl OutputGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates (or truncates) the file backing the named output.
    pub fn create_output(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<BufWriter<File>, FaviconError> {
        let name = name.into();
        let path = path.as_ref();

        if let Some(existing) = self.outputs.get(&name) {
            return Err(FaviconError::DuplicatedOutput {
                name,
                path: existing.clone(),
            });
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        self.outputs.insert(name, path.to_path_buf());

        Ok(BufWriter::new(file))
    }

    pub fn finalize(self) -> BuildOutputs {
        BuildOutputs {
            outputs: self.outputs,
        }
    }
}

/// The files written by one generation run, keyed by output name.
#[derive(Debug)]
pub struct BuildOutputs {
    outputs: BTreeMap<String, PathBuf>,
}

impl BuildOutputs {
    pub fn get_output(&self, name: &str) -> Result<&Path, FaviconError> {
        self.outputs
            .get(name)
            .map(PathBuf::as_path)
            .ok_or_else(|| FaviconError::OutputNotFound(name.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.outputs
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }
}
