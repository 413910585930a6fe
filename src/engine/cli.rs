//! CLI command handler: layer config, open files, install Ctrl+C, run the scan, print the summary.

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::engine::arg_parser::Cli;
use crate::engine::probe::HttpProber;
use crate::engine::progress::{create_counter, refresh_bar, update_progress_bar};
use crate::pipeline::{CancelToken, Sinks, run_scan};
use crate::utils::{
    Colors, PackagePaths, apply_file_to_opts, cap_concurrency, load_pathprobe_toml, setup_logging,
};
use crate::{Opts, ResultRecord, ScanSummary};

/// Overwrite opts field from the CLI when the flag was given.
macro_rules! apply_cli_opt {
    ($cli:expr, $dst:expr, $field:ident) => {
        if let Some(v) = $cli.$field.clone() {
            $dst = v;
        }
    };
}

/// Defaults → `.pathprobe.toml` in the working directory → CLI flags.
pub fn setup_opts(cli: &Cli, config_dir: &Path) -> Result<Opts> {
    let mut opts = Opts::default();
    if let Some(file) = load_pathprobe_toml(config_dir) {
        apply_file_to_opts(&file, &mut opts)?;
    }
    apply_cli_opt!(cli, opts.target.host, host);
    apply_cli_opt!(cli, opts.target.port, port);
    apply_cli_opt!(cli, opts.target.method, method);
    apply_cli_opt!(cli, opts.target.https, https);
    apply_cli_opt!(cli, opts.dict_path, dict);
    apply_cli_opt!(cli, opts.out_dir, out_dir);
    apply_cli_opt!(cli, opts.verbose, verbose);
    if let Some(no_proxy) = cli.no_proxy {
        opts.target.use_env_proxy = !no_proxy;
    }
    if let Some(c) = cli.concurrency {
        opts.scan.concurrency = c as usize;
    }
    if let Some(secs) = cli.timeout {
        opts.target.timeout = Duration::from_secs(secs);
    }

    opts.target.host = opts.target.host.trim().to_string();
    if opts.target.host.is_empty() {
        bail!("Host (-H or --host) is required. Example: -H www.example.com");
    }
    if opts.scan.concurrency == 0 {
        bail!("Concurrency must be at least 1");
    }
    Ok(opts)
}

/// Create (truncate) the three output files in `dir`.
pub fn open_sinks(dir: &Path) -> Result<Sinks<BufWriter<File>>> {
    let create = |name: &str| -> Result<BufWriter<File>> {
        let path = dir.join(name);
        File::create(&path)
            .map(BufWriter::new)
            .with_context(|| format!("Cannot create {}", path.display()))
    };
    Ok(Sinks::new(
        create(PackagePaths::RAW_LOG)?,
        create(PackagePaths::SUCCESS_LOG)?,
        create(PackagePaths::EX404_LOG)?,
    ))
}

/// Ctrl+C / SIGTERM requests cancellation; repeated signals are harmless.
fn install_interrupt_handler(cancel: &CancelToken) -> Result<()> {
    let cancel = cancel.clone();
    ctrlc::set_handler(move || {
        if cancel.cancel() {
            warn!("Received interrupt signal. Attempting graceful shutdown...");
        }
    })
    .context("set Ctrl+C handler")
}

fn print_summary(summary: &ScanSummary, out_dir: &Path) {
    let counts = &summary.counts;
    if summary.cancelled {
        warn!("Scan interrupted.");
    }
    info!("Scan completed: {} paths probed", counts.raw);
    info!("Results in {}:", out_dir.display());
    info!(
        "    {:<17}(Raw log of all requests, {} errors)",
        PackagePaths::RAW_LOG,
        Colors::colorize(Colors::ERROR, &counts.errors.to_string())
    );
    info!(
        "    {:<17}(Endpoints returning 200 OK: {})",
        PackagePaths::SUCCESS_LOG,
        Colors::colorize(Colors::SUCCESS, &counts.success.to_string())
    );
    info!(
        "    {:<17}(Endpoints not returning 404: {})",
        PackagePaths::EX404_LOG,
        Colors::colorize(Colors::EX404, &counts.ex404.to_string())
    );
}

/// Run a scan from CLI arguments.
pub fn handle_run(cli: &Cli) -> Result<()> {
    setup_logging(cli.verbose.unwrap_or(false));
    let mut opts = setup_opts(cli, Path::new("."))?;
    opts.scan.concurrency = cap_concurrency(opts.scan.concurrency);
    debug!(
        "{} CONFIG:{:#?}",
        PackagePaths::get().pkg_name().to_uppercase(),
        opts
    );

    let dict = File::open(&opts.dict_path).with_context(|| {
        format!("Cannot open dictionary file {:?}", opts.dict_path.display())
    })?;
    let sinks = open_sinks(&opts.out_dir)?;
    let prober = HttpProber::new(&opts.target)?;

    let cancel = CancelToken::new();
    install_interrupt_handler(&cancel)?;

    info!(
        "Probing {} with {} ({} workers, {:?} timeout)",
        opts.target.base_url(),
        opts.target.method,
        opts.scan.concurrency,
        opts.target.timeout
    );

    let bar = opts.verbose.then(|| create_counter("Probing"));
    if let Some(ref b) = bar {
        refresh_bar(b);
    }
    let on_record = bar
        .as_ref()
        .map(|b| move |_: &ResultRecord| update_progress_bar(b, 1));

    let report = run_scan(
        BufReader::new(dict),
        Arc::new(prober),
        sinks,
        &opts.scan,
        &cancel,
        on_record.as_ref().map(|f| f as &dyn Fn(&ResultRecord)),
    )?;
    if bar.is_some() {
        eprintln!();
    }

    print_summary(&report.summary, &opts.out_dir);
    Ok(())
}
