use clap::Parser;
use std::path::PathBuf;

use crate::Method;

/// Dictionary-driven forced browsing against a single HTTP host.
///
/// Writes `.log.dat` (every probe), `output-200.txt` (200 OK) and `output-ex404.txt`
/// (everything but 404 Not Found). Ctrl+C stops admitting paths and shuts down gracefully.
#[derive(Clone, Parser)]
#[command(name = "pathprobe", version)]
#[command(about = "Probe a host for every path in a dictionary; sort results into 200 / non-404 logs.")]
pub struct Cli {
    /// Target host or IP address (required here or in .pathprobe.toml).
    #[arg(long, short = 'H')]
    pub host: Option<String>,

    /// Port to connect to. Default: 80.
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Dictionary file, one path per line. Default: hybridWebSearch.dic.
    #[arg(long, short = 'd')]
    pub dict: Option<PathBuf>,

    /// Number of concurrent workers (>= 1). Default: 10.
    #[arg(long, short = 'c', value_parser = clap::value_parser!(u32).range(1..))]
    pub concurrency: Option<u32>,

    /// HTTP method: HEAD or GET (case-insensitive). Default: HEAD.
    #[arg(long = "type", short = 't', value_name = "METHOD")]
    pub method: Option<Method>,

    /// Per-request timeout in seconds. Default: 5.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Use https:// instead of http://.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub https: Option<bool>,

    /// Ignore HTTP_PROXY / HTTPS_PROXY from the environment.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub no_proxy: Option<bool>,

    /// Directory to write the three output files to. Default: current directory.
    #[arg(long, short = 'o')]
    pub out_dir: Option<PathBuf>,

    /// Verbose output (debug logs and a progress counter).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
