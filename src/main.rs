use anyhow::Context;
use std::path::PathBuf;
use tracing::info;
use vodkit::{
    config::Config,
    logging,
    tools::{exec::{exec_with, ExecOptions}, filter::{filter_video_ids_value, SpecificVods}, json::read_json_file, temp::temp_file_path},
    ProjectPaths,
};

const USAGE: &str = "usage: vodkit [--config FILE] <paths | temp-path [--prefix P] [--suffix S] | filter --ids FILE [--criteria C] [--vods LIST] | exec -- PROGRAM [ARGS...]>";

fn usage_exit(msg: &str) -> ! {
    eprintln!("{msg}\n{USAGE}");
    std::process::exit(2);
}

/// Value following a flag at `args[*i]`, advancing the cursor.
fn flag_value(args: &[String], i: &mut usize) -> String {
    let flag = &args[*i];
    *i += 1;
    if *i >= args.len() { usage_exit(&format!("{flag} requires a value")); }
    args[*i].clone()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path = PathBuf::from("vodkit.toml");
    let mut i = 1;
    while i < args.len() && args[i].starts_with("--") {
        match args[i].as_str() {
            "--config" => config_path = PathBuf::from(flag_value(&args, &mut i)),
            "--help" | "-h" => { println!("{USAGE}"); return Ok(()); }
            other => usage_exit(&format!("unknown option {other}")),
        }
        i += 1;
    }
    let Some(sub) = args.get(i).cloned() else { usage_exit("missing command") };
    let rest = &args[i + 1..];

    let cfg = Config::load_or_default(&config_path).context("loading config")?;
    cfg.validate().context("validating config")?;
    let paths = ProjectPaths::from_config(&cfg).context("resolving project root")?;
    info!(root = %paths.project_root().display(), command = %sub, "vodkit ready");

    match sub.as_str() {
        "paths" => {
            println!("root={}", paths.project_root().display());
            println!("data={}", paths.data_path("").display());
            println!("temp={}", paths.temp_dir().display());
        }
        "temp-path" => {
            let (mut prefix, mut suffix) = (None, String::new());
            let mut j = 0;
            while j < rest.len() {
                match rest[j].as_str() {
                    "--prefix" => prefix = Some(flag_value(rest, &mut j)),
                    "--suffix" => suffix = flag_value(rest, &mut j),
                    other => usage_exit(&format!("unknown temp-path option {other}")),
                }
                j += 1;
            }
            let path = temp_file_path(&paths, prefix.as_deref(), &suffix).await?;
            println!("{}", path.display());
        }
        "filter" => {
            let (mut ids_file, mut criteria, mut vods) = (None, None, None);
            let mut j = 0;
            while j < rest.len() {
                match rest[j].as_str() {
                    "--ids" => ids_file = Some(PathBuf::from(flag_value(rest, &mut j))),
                    "--criteria" => criteria = Some(flag_value(rest, &mut j)),
                    "--vods" => vods = Some(SpecificVods::from(flag_value(rest, &mut j))),
                    other => usage_exit(&format!("unknown filter option {other}")),
                }
                j += 1;
            }
            let Some(ids_file) = ids_file else { usage_exit("filter requires --ids") };
            let ids = read_json_file(&ids_file).await;
            let selected = filter_video_ids_value(&ids, criteria.as_deref(), vods.as_ref());
            println!("{}", serde_json::to_string(&selected)?);
        }
        "exec" => {
            let command = match rest.first().map(String::as_str) {
                Some("--") => &rest[1..],
                _ => rest,
            };
            let opts = ExecOptions::from_config(&cfg);
            let code = match exec_with(command, &opts, &mut tokio::io::stdout()).await {
                Ok(code) => code,
                Err(e) => {
                    eprintln!("{}: {e}", e.code());
                    std::process::exit(e.exit_status());
                }
            };
            info!(code = ?code, "command finished");
            std::process::exit(code.unwrap_or(1));
        }
        other => usage_exit(&format!("unknown command {other}")),
    }
    Ok(())
}
