use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use cpd_importer::{
    CpdTokenStore, ImportSummary, ImporterSettings, ProjectFiles,
    config::{ConfigError, LogLevel, find_settings_file},
    find_report_files, import_cpd_reports,
    vfs::normalized_path,
};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "cpd-importer", version, about)]
struct Args {
    /// Report files, or directories searched for report files.
    #[arg(required = true)]
    reports: Vec<PathBuf>,

    /// Root that analyzer file paths are resolved against.
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Settings file; defaults to the nearest cpd-import.toml above the project root.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn load_settings(args: &Args) -> Result<ImporterSettings, ConfigError> {
    let path = args.config.clone().or_else(|| find_settings_file(&normalized_path(&args.project_root)));
    match path {
        Some(path) => ImporterSettings::load(&path),
        None => Ok(ImporterSettings::default()),
    }
}

fn init_logging(
    args: &Args,
    level: LogLevel,
) {
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        level
    };
    let directive = format!("cpd_importer={}", level.as_directive());

    let stderr_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(stderr_filter);

    let file_layer = args.log_file.as_ref().map(|log_path| {
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(Path::new(".")),
            log_path.file_name().unwrap_or(std::ffi::OsStr::new("cpd-importer.log")),
        );
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(false)
            .with_filter(EnvFilter::new(&directive))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();
}

fn print_summary(
    summary: &ImportSummary,
    json: bool,
) {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(text) => println!("{text}"),
            Err(err) => error!("Cannot serialize summary: {err}"),
        }
        return;
    }

    for report in &summary.imported {
        println!(
            "{}: {} file(s), {} token(s), {} unresolved record(s), {} already saved file(s), {} skipped token(s)",
            report.report.display(),
            report.saved_files,
            report.saved_tokens,
            report.stats.unresolved,
            report.skipped_files,
            report.skipped_tokens,
        );
    }
    for failed in &summary.failed {
        println!("{}: failed: {}", failed.report.display(), failed.error);
    }
    println!(
        "total: {} file(s), {} token(s) from {} report(s), {} failed",
        summary.saved_files(),
        summary.saved_tokens(),
        summary.imported.len(),
        summary.failed.len(),
    );
}

fn main() -> ExitCode {
    let args = Args::parse();

    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("cpd-importer: {err}");
            return ExitCode::from(2);
        },
    };
    init_logging(&args, settings.logging.level);

    info!("Starting cpd-importer v{}", env!("CARGO_PKG_VERSION"));

    let index = match ProjectFiles::scan(&args.project_root, &settings.project) {
        Ok(index) => index,
        Err(err) => {
            error!("Cannot index project root {}: {err}", args.project_root.display());
            return ExitCode::FAILURE;
        },
    };
    info!("Indexed {} project file(s) under {}", index.len(), args.project_root.display());

    let reports = find_report_files(&args.reports, &settings.import.report_file_name);
    if reports.is_empty() {
        warn!("No {} report found", settings.import.report_file_name);
    }

    let store = CpdTokenStore::new();
    let summary = import_cpd_reports(&reports, &index, &store, &settings.import);
    print_summary(&summary, args.json);

    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
