use crate::config::{resolve_root, Config};
use std::path::{Path, PathBuf};

/// Project-relative locations, resolved once at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    root: PathBuf,
    data_dir: String,
    temp_subdir: String,
    temp_prefix: String,
}

impl ProjectPaths {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let root = resolve_root(cfg.paths.project_root.as_deref())?;
        Ok(Self {
            root,
            data_dir: cfg.paths.data_dir.clone(),
            temp_subdir: cfg.temp.subdir.clone(),
            temp_prefix: cfg.temp.default_prefix.clone(),
        })
    }

    /// Defaults rooted at an explicit, already absolute directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let cfg = Config::default();
        Self {
            root: root.into(),
            data_dir: cfg.paths.data_dir,
            temp_subdir: cfg.temp.subdir,
            temp_prefix: cfg.temp.default_prefix,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.root
    }

    /// `<root>/data/<subdir>`. `subdir` is not sanitised.
    pub fn data_path(&self, subdir: impl AsRef<Path>) -> PathBuf {
        self.root.join(&self.data_dir).join(subdir)
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.data_path(&self.temp_subdir)
    }

    pub fn default_temp_prefix(&self) -> &str {
        &self.temp_prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_path_joins_under_root() {
        let p = ProjectPaths::with_root("/srv/vods");
        assert_eq!(p.project_root(), Path::new("/srv/vods"));
        assert_eq!(p.data_path("chat"), PathBuf::from("/srv/vods/data/chat"));
        assert_eq!(p.temp_dir(), PathBuf::from("/srv/vods/data/temp"));
    }

    #[test]
    fn from_config_uses_overrides() {
        let mut cfg = Config::default();
        cfg.paths.project_root = Some(PathBuf::from("/does/not/exist"));
        cfg.paths.data_dir = "store".into();
        cfg.temp.subdir = "scratch".into();
        let p = ProjectPaths::from_config(&cfg).unwrap();
        assert_eq!(p.temp_dir(), PathBuf::from("/does/not/exist/store/scratch"));
    }

    #[test]
    fn default_root_is_crate_dir() {
        let p = ProjectPaths::from_config(&Config::default()).unwrap();
        assert!(p.project_root().is_absolute());
        assert!(p.project_root().join("Cargo.toml").exists());
    }
}
