//! Load `.pathprobe.toml` from a directory (CLI only). Lib callers build [`Opts`](crate::Opts) themselves.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::utils::config::PackagePaths;
use crate::{Method, Opts};

#[derive(Debug, Default, Deserialize)]
pub struct PathprobeToml {
    #[serde(default)]
    settings: ScanSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScanSection {
    host: Option<String>,
    port: Option<u16>,
    dict: Option<String>,
    concurrency: Option<usize>,
    method: Option<String>,
    timeout: Option<u64>,
    https: Option<bool>,
    out_dir: Option<String>,
    user_agent: Option<String>,
    no_proxy: Option<bool>,
}

impl PathprobeToml {
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).context("parse config")
    }
}

/// Load the package config file from `dir` if present. Returns None if missing or invalid.
pub fn load_pathprobe_toml(dir: &Path) -> Option<PathprobeToml> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    PathprobeToml::parse(&s)
        .map_err(|e| log::warn!("{}: {:#}", path.display(), e))
        .ok()
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $dst:expr, $field:ident) => {
        if let Some(v) = $sec.$field.clone() {
            $dst = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI flags.
pub fn apply_file_to_opts(file: &PathprobeToml, opts: &mut Opts) -> Result<()> {
    let sec = &file.settings;
    apply_file_opt!(sec, opts.target.host, host);
    apply_file_opt!(sec, opts.target.port, port);
    apply_file_opt!(sec, opts.target.https, https);
    apply_file_opt!(sec, opts.target.user_agent, user_agent);
    apply_file_opt!(sec, opts.scan.concurrency, concurrency);
    if let Some(ref m) = sec.method {
        opts.target.method = m.parse::<Method>().context("settings.method")?;
    }
    if let Some(no_proxy) = sec.no_proxy {
        opts.target.use_env_proxy = !no_proxy;
    }
    if let Some(secs) = sec.timeout {
        if secs == 0 {
            bail!("settings.timeout must be at least 1 second");
        }
        opts.target.timeout = Duration::from_secs(secs);
    }
    if let Some(ref d) = sec.dict {
        opts.dict_path = PathBuf::from(d);
    }
    if let Some(ref d) = sec.out_dir {
        opts.out_dir = PathBuf::from(d);
    }
    Ok(())
}
