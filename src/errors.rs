use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VodError {
    #[error("empty command")]
    EmptyCommand,
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stream error: {0}")]
    Stream(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl VodError {
    pub fn code(&self) -> &'static str {
        match self {
            VodError::EmptyCommand => "EmptyCommand",
            VodError::Spawn { .. } => "Spawn",
            VodError::CreateDir { .. } => "CreateDir",
            VodError::Write { .. } => "Write",
            VodError::Stream(_) => "Stream",
            VodError::Internal(_) => "Internal",
        }
    }

    /// Process exit status the CLI uses when this error ends a run.
    pub fn exit_status(&self) -> i32 {
        match self {
            VodError::EmptyCommand => 2,
            VodError::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound => 127,
            VodError::Spawn { .. } => 126,
            _ => 1,
        }
    }
}

pub type VodResult<T> = Result<T, VodError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn spawn_not_found_maps_to_127() {
        let err = VodError::Spawn { program: "nope".into(), source: io::Error::from(io::ErrorKind::NotFound) };
        assert_eq!(err.code(), "Spawn");
        assert_eq!(err.exit_status(), 127);
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn create_dir_message_names_path() {
        let err = VodError::CreateDir { path: PathBuf::from("/x/y"), source: io::Error::from(io::ErrorKind::PermissionDenied) };
        assert_eq!(err.code(), "CreateDir");
        assert_eq!(err.exit_status(), 1);
        assert!(err.to_string().contains("/x/y"));
    }
}
