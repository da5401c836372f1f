//! Filesystem, subprocess, and VOD id filtering helpers for the archiver.

pub mod config;
pub mod errors;
pub mod logging;
pub mod tools;

pub use errors::{VodError, VodResult};
pub use tools::{
    ensure_dir_exists,
    exec::{exec, exec_to, exec_with, ExecOptions, ExitCode},
    filter::{filter_video_ids, filter_video_ids_value, Criteria, SpecificVods},
    json::{read_json_file, read_json_list, write_json_file},
    paths::ProjectPaths,
    temp::temp_file_path,
};
