use crate::{errors::{VodError, VodResult}, tools::ensure_dir_exists};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// Read and parse a JSON file. Any failure, missing file included, yields `[]`.
///
/// Callers cannot tell "no file" from "corrupt file"; both mean "no prior data".
pub async fn read_json_file(path: &Path) -> Value {
    match try_read(path).await {
        Ok(v) => v,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "json read failed, using empty list");
            Value::Array(Vec::new())
        }
    }
}

/// Typed variant of [`read_json_file`]: anything other than a well-formed
/// array of `T` yields an empty vec.
pub async fn read_json_list<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    match serde_json::from_value(read_json_file(path).await) {
        Ok(items) => items,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "json content has unexpected shape, using empty list");
            Vec::new()
        }
    }
}

async fn try_read(path: &Path) -> anyhow::Result<Value> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

pub async fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> VodResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent).await?;
    }
    let mut body = serde_json::to_vec_pretty(value).map_err(|e| VodError::Internal(e.to_string()))?;
    body.push(b'\n');
    tokio::fs::write(path, body).await.map_err(|source| VodError::Write { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn missing_file_is_empty_list() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let v = read_json_file(&tmp.path().join("nope.json")).await;
        assert_eq!(v, json!([]));
    }

    #[tokio::test]
    async fn corrupt_file_is_empty_list() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let f = tmp.child("bad.json");
        f.write_str("{not json").unwrap();
        assert_eq!(read_json_file(f.path()).await, json!([]));
    }

    #[tokio::test]
    async fn object_is_returned_as_is() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let f = tmp.child("state.json");
        f.write_str(r#"{"last":"v42"}"#).unwrap();
        assert_eq!(read_json_file(f.path()).await, json!({"last": "v42"}));
        let ids: Vec<String> = read_json_list(f.path()).await;
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn write_then_read_list() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("ids.json");
        write_json_file(&path, &["v1", "v2"]).await.unwrap();
        let ids: Vec<String> = read_json_list(&path).await;
        assert_eq!(ids, vec!["v1".to_string(), "v2".to_string()]);
    }
}
