use crate::{errors::VodResult, tools::{ensure_dir_exists, paths::ProjectPaths}};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const RANDOM_DIGITS: usize = 11;

/// Build `<temp dir>/{prefix}_{unique}{suffix}`, creating the temp dir first.
/// The file itself is not created.
pub async fn temp_file_path(paths: &ProjectPaths, prefix: Option<&str>, suffix: &str) -> VodResult<PathBuf> {
    let dir = paths.temp_dir();
    ensure_dir_exists(&dir).await?;
    let prefix = prefix.unwrap_or_else(|| paths.default_temp_prefix());
    Ok(dir.join(temp_file_name(prefix, suffix)))
}

pub fn temp_file_name(prefix: &str, suffix: &str) -> String {
    format!("{prefix}_{}{suffix}", unique_id())
}

/// Millisecond clock in base 36 followed by random base-36 digits.
fn unique_id() -> String {
    let millis = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or_default();
    let mut random = to_base36(Uuid::new_v4().as_u128());
    random.truncate(RANDOM_DIGITS);
    format!("{}{random}", to_base36(millis))
}

fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
