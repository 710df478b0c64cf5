//! Running CPD imports over analyzer report files.
//!
//! The analyzer writes one `token-cpd.pb` per analyzed project into its
//! output directory. Each file is imported in its own session; a broken
//! report fails its session only.

use std::{
    collections::BTreeSet,
    io::Read,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::{
    config::ImportSettings,
    cpd::{CpdSink, CpdTokensConsumer},
    project::FileResolver,
    protobuf::{CopyPasteTokenInfo, ImportError, ImportStats, RecordImporter},
};

const CPD_RECORD_KIND: &str = "CPD token";

/// Outcome of one successful session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub report: PathBuf,
    #[serde(flatten)]
    pub stats: ImportStats,
    pub saved_files: usize,
    pub saved_tokens: usize,
    /// Records whose file an earlier report already saved.
    pub skipped_files: usize,
    pub skipped_tokens: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedReport {
    pub report: PathBuf,
    pub error: String,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: Vec<ImportReport>,
    pub failed: Vec<FailedReport>,
}

impl ImportSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn saved_files(&self) -> usize {
        self.imported.iter().map(|r| r.saved_files).sum()
    }

    pub fn saved_tokens(&self) -> usize {
        self.imported.iter().map(|r| r.saved_tokens).sum()
    }

    pub fn skipped_files(&self) -> usize {
        self.imported.iter().map(|r| r.skipped_files).sum()
    }

    pub fn skipped_tokens(&self) -> usize {
        self.imported.iter().map(|r| r.skipped_tokens).sum()
    }

    pub fn unresolved_records(&self) -> usize {
        self.imported.iter().map(|r| r.stats.unresolved).sum()
    }
}

/// Expand report arguments into report files.
///
/// Files are taken as given; directories are searched recursively for
/// `file_name`. Missing paths are skipped with a warning.
pub fn find_report_files(
    paths: &[PathBuf],
    file_name: &str,
) -> Vec<PathBuf> {
    let mut seen = BTreeSet::new();
    let mut reports = Vec::new();
    for path in paths {
        if path.is_file() {
            if seen.insert(path.clone()) {
                reports.push(path.clone());
            }
            continue;
        }
        if !path.is_dir() {
            warn!("Report path {} does not exist", path.display());
            continue;
        }
        let found = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file() && entry.file_name() == file_name)
            .map(|entry| entry.into_path());
        for report in found {
            if seen.insert(report.clone()) {
                reports.push(report);
            }
        }
    }
    reports
}

/// Import CPD tokens from an already-open stream.
pub fn import_cpd_stream<R, F, S>(
    label: &Path,
    stream: R,
    resolver: &F,
    sink: &S,
    settings: &ImportSettings,
) -> Result<ImportReport, ImportError>
where
    R: Read,
    F: FileResolver + ?Sized,
    S: CpdSink + ?Sized,
{
    let importer = RecordImporter::<CopyPasteTokenInfo, _>::new(CPD_RECORD_KIND, CopyPasteTokenInfo::path)
        .with_max_message_len(settings.max_message_size_bytes());
    let mut consumer = CpdTokensConsumer::new(sink);
    let stats = importer.run(stream, resolver, &mut consumer)?;

    if consumer.skipped_tokens() > 0 {
        warn!("Skipped {} malformed CPD token(s) in {}", consumer.skipped_tokens(), label.display());
    }
    Ok(ImportReport {
        report: label.to_path_buf(),
        stats,
        saved_files: consumer.saved_files(),
        saved_tokens: consumer.saved_tokens(),
        skipped_files: consumer.skipped_files(),
        skipped_tokens: consumer.skipped_tokens(),
    })
}

pub fn import_cpd_report<F, S>(
    report: &Path,
    resolver: &F,
    sink: &S,
    settings: &ImportSettings,
) -> Result<ImportReport, ImportError>
where
    F: FileResolver + ?Sized,
    S: CpdSink + ?Sized,
{
    let file = std::fs::File::open(report).map_err(|source| ImportError::Open {
        path: report.to_path_buf(),
        source,
    })?;
    info!("Importing CPD tokens from {}", report.display());
    import_cpd_stream(report, file, resolver, sink, settings)
}

/// Import every report, continuing past reports whose session aborts.
pub fn import_cpd_reports<F, S>(
    reports: &[PathBuf],
    resolver: &F,
    sink: &S,
    settings: &ImportSettings,
) -> ImportSummary
where
    F: FileResolver + ?Sized,
    S: CpdSink + ?Sized,
{
    let mut summary = ImportSummary::default();
    for report in reports {
        match import_cpd_report(report, resolver, sink, settings) {
            Ok(imported) => summary.imported.push(imported),
            Err(err) => {
                error!("CPD import from {} failed: {err}", report.display());
                summary.failed.push(FailedReport {
                    report: report.clone(),
                    error: err.to_string(),
                    offset: err.offset(),
                });
            },
        }
    }
    summary
}

#[cfg(test)]
#[path = "../tests/src/report_tests.rs"]
mod tests;
