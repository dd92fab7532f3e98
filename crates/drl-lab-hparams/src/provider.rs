//! Override sources and the loader capability that locates them

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{HparamOverrides, HparamsError, Result};

/// File stem of the override document inside an `--hparams` directory
pub const HPARAMS_STEM: &str = "hparams";

/// Anything that can produce partial versions of the four groups
pub trait OverrideProvider {
    /// Human-readable origin, used in logs
    fn source(&self) -> String;

    /// Produce the overrides
    fn overrides(&self) -> Result<HparamOverrides>;
}

impl OverrideProvider for HparamOverrides {
    fn source(&self) -> String {
        "in-memory overrides".to_string()
    }

    fn overrides(&self) -> Result<HparamOverrides> {
        Ok(self.clone())
    }
}

/// Resolves an `--hparams` path to an override provider
pub trait OverrideLoader {
    /// Locate the provider behind `path`
    fn load(&self, path: &Path) -> Result<Box<dyn OverrideProvider>>;
}

impl<F> OverrideLoader for F
where
    F: Fn(&Path) -> Result<Box<dyn OverrideProvider>>,
{
    fn load(&self, path: &Path) -> Result<Box<dyn OverrideProvider>> {
        self(path)
    }
}

/// Syntax of an override document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `hparams.toml`
    Toml,
    /// `hparams.json`
    Json,
}

impl DocumentFormat {
    /// Lookup order inside a directory
    pub const SEARCH_ORDER: [Self; 2] = [Self::Toml, Self::Json];

    /// File extension without the dot
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }

    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }

    fn parse(self, content: &str) -> Result<Value> {
        Ok(match self {
            Self::Toml => {
                let table: toml::Table = toml::from_str(content)?;
                serde_json::to_value(table)?
            }
            Self::Json => serde_json::from_str(content)?,
        })
    }
}

/// An override document on disk
#[derive(Debug, Clone)]
pub struct OverrideFile {
    path: PathBuf,
    format: DocumentFormat,
}

impl OverrideFile {
    /// Wrap a document path; the format follows the extension, TOML otherwise
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = DocumentFormat::from_path(&path);
        Self { path, format }
    }

    /// Document path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Document format
    #[must_use]
    pub fn format(&self) -> DocumentFormat {
        self.format
    }
}

impl OverrideProvider for OverrideFile {
    fn source(&self) -> String {
        self.path.display().to_string()
    }

    fn overrides(&self) -> Result<HparamOverrides> {
        let content = fs::read_to_string(&self.path)?;
        let doc = self.format.parse(&content)?;
        HparamOverrides::from_document(doc, &self.path)
    }
}

/// Loads `hparams.toml` / `hparams.json` from the filesystem.
///
/// The path may name the directory holding the document or the document
/// itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOverrideLoader;

impl FsOverrideLoader {
    /// Find the override document for `path` without reading it
    pub fn locate(path: &Path) -> Result<OverrideFile> {
        if !path.exists() {
            return Err(HparamsError::ConfigNotFound(path.to_path_buf()));
        }
        if path.is_file() {
            return Ok(OverrideFile::new(path));
        }

        DocumentFormat::SEARCH_ORDER
            .iter()
            .map(|format| path.join(format!("{HPARAMS_STEM}.{}", format.extension())))
            .find(|candidate| candidate.is_file())
            .map(OverrideFile::new)
            .ok_or_else(|| HparamsError::ModuleNotFound(path.to_path_buf()))
    }
}

impl OverrideLoader for FsOverrideLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn OverrideProvider>> {
        let file = Self::locate(path)?;
        tracing::debug!(path = %file.path().display(), format = ?file.format(), "located override document");
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NnOverride;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const TOML_DOC: &str = r#"
[env_hparams]
env_id = "Catcher-v0"

[run_hparams]
max_steps = 2000

[nn_hparams]

[agent_hparams]
batch_size = 16
"#;

    #[test]
    fn test_missing_path() {
        let err = FsOverrideLoader.load(Path::new("/nonexistent/path")).err().unwrap();
        assert!(matches!(err, HparamsError::ConfigNotFound(p) if p == Path::new("/nonexistent/path")));
    }

    #[test]
    fn test_directory_without_document() {
        let dir = tempdir().unwrap();
        let err = FsOverrideLoader.load(dir.path()).err().unwrap();
        assert!(matches!(err, HparamsError::ModuleNotFound(_)));
    }

    #[test]
    fn test_toml_preferred_over_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("hparams.toml"), TOML_DOC).unwrap();
        fs::write(dir.path().join("hparams.json"), "{}").unwrap();

        let file = FsOverrideLoader::locate(dir.path()).unwrap();
        assert_eq!(file.format(), DocumentFormat::Toml);

        let overrides = file.overrides().unwrap();
        assert_eq!(overrides.env.env_id.as_deref(), Some("Catcher-v0"));
        assert_eq!(overrides.run.max_steps, Some(2000));
        assert_eq!(overrides.agent.batch_size, Some(16));
        assert_eq!(overrides.nn, NnOverride::default());
    }

    #[test]
    fn test_json_document_by_direct_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tuned.json");
        fs::write(
            &path,
            r#"{
                "env_hparams": {"observation": {"normalize": true, "rescaled_shape": [84, 84], "opt_flow": false}},
                "run_hparams": {"save_at": [0.5, 1.0]},
                "nn_hparams": {"saved_model": null},
                "agent_hparams": {}
            }"#,
        )
        .unwrap();

        let provider = FsOverrideLoader.load(&path).unwrap();
        assert_eq!(provider.source(), path.display().to_string());

        let overrides = provider.overrides().unwrap();
        assert_eq!(overrides.env.observation.unwrap().rescaled_shape, vec![84, 84]);
        assert_eq!(overrides.nn.saved_model, Some(None));
        assert!(overrides.run.save_at.is_some());
    }

    #[test]
    fn test_toml_syntax_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("hparams.toml"), "[env_hparams\n").unwrap();

        let provider = FsOverrideLoader.load(dir.path()).unwrap();
        assert!(matches!(provider.overrides(), Err(HparamsError::Toml(_))));
    }

    #[test]
    fn test_closure_loader() {
        let loader = |_: &Path| -> Result<Box<dyn OverrideProvider>> {
            Ok(Box::new(HparamOverrides::default()))
        };
        let provider = loader.load(Path::new("anything")).unwrap();
        assert_eq!(provider.source(), "in-memory overrides");
        assert_eq!(provider.overrides().unwrap(), HparamOverrides::default());
    }
}
