use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub temp: Temp,
    #[serde(default)]
    pub exec: Exec,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Paths {
    /// Absent means the crate's own directory.
    #[serde(default)]
    pub project_root: Option<PathBuf>,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}
fn default_data_dir() -> String { "data".to_string() }

impl Default for Paths {
    fn default() -> Self { Self { project_root: None, data_dir: default_data_dir() } }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Temp {
    #[serde(default = "default_temp_subdir")]
    pub subdir: String,
    #[serde(default = "default_temp_prefix")]
    pub default_prefix: String,
}
fn default_temp_subdir() -> String { "temp".to_string() }
fn default_temp_prefix() -> String { "temp".to_string() }

impl Default for Temp {
    fn default() -> Self { Self { subdir: default_temp_subdir(), default_prefix: default_temp_prefix() } }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Exec {
    /// When non-empty the child env is cleared and only these are forwarded.
    #[serde(default)]
    pub pass_env: Vec<String>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Ok(toml::from_str(&raw)?)
        }
    }

    /// Missing file yields defaults; anything else wrong with it is an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        validate_segment("paths.data_dir", &self.paths.data_dir)?;
        validate_segment("temp.subdir", &self.temp.subdir)?;
        if self.temp.default_prefix.contains(['/', '\\']) {
            anyhow::bail!("temp.default_prefix must not contain path separators");
        }
        Ok(())
    }
}

fn validate_segment(field: &str, value: &str) -> anyhow::Result<()> {
    if value.trim().is_empty() { anyhow::bail!("{field} must not be empty"); }
    if value.contains(['/', '\\']) || value == ".." {
        anyhow::bail!("{field} must be a single directory name: {value}");
    }
    Ok(())
}

/// Resolve the project root to an absolute path.
pub fn resolve_root(configured: Option<&Path>) -> anyhow::Result<PathBuf> {
    let root = match configured {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => std::env::current_dir()?.join(p),
        None => PathBuf::from(env!("CARGO_MANIFEST_DIR")),
    };
    if root.exists() {
        Ok(dunce::canonicalize(&root)?)
    } else {
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let cfg = Config::load_or_default(&tmp.path().join("absent.toml")).unwrap();
        assert!(cfg.paths.project_root.is_none());
        assert_eq!(cfg.paths.data_dir, "data");
        assert_eq!(cfg.temp.subdir, "temp");
        assert_eq!(cfg.temp.default_prefix, "temp");
        assert!(cfg.exec.pass_env.is_empty());
        cfg.validate().unwrap();
    }

    #[test]
    fn toml_and_json_both_load() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let t = tmp.child("vodkit.toml");
        t.write_str("[paths]\nproject_root = \"/srv/vods\"\n[exec]\npass_env = [\"PATH\"]\n").unwrap();
        let cfg = Config::load(t.path()).unwrap();
        assert_eq!(cfg.paths.project_root.as_deref(), Some(Path::new("/srv/vods")));
        assert_eq!(cfg.paths.data_dir, "data");
        assert_eq!(cfg.exec.pass_env, vec!["PATH".to_string()]);

        let j = tmp.child("vodkit.json");
        j.write_str(r#"{"temp":{"subdir":"scratch"}}"#).unwrap();
        let cfg = Config::load(j.path()).unwrap();
        assert_eq!(cfg.temp.subdir, "scratch");
        assert_eq!(cfg.temp.default_prefix, "temp");
    }

    #[test]
    fn invalid_file_is_an_error() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let t = tmp.child("bad.toml");
        t.write_str("[paths\n").unwrap();
        assert!(Config::load_or_default(t.path()).is_err());
    }

    #[test]
    fn validate_rejects_nested_subdirs() {
        let mut cfg = Config::default();
        cfg.temp.subdir = "a/b".into();
        assert!(cfg.validate().is_err());
        let mut cfg = Config::default();
        cfg.paths.data_dir = "  ".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn root_is_absolute() {
        assert!(resolve_root(None).unwrap().is_absolute());
        assert!(resolve_root(Some(Path::new("some/rel"))).unwrap().is_absolute());
        let tmp = tempfile::tempdir().unwrap();
        let got = resolve_root(Some(tmp.path())).unwrap();
        assert_eq!(got, dunce::canonicalize(tmp.path()).unwrap());
    }
}
