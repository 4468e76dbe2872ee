use crate::catalog::KnownInstrumentCatalog;
use crate::cli::commands::{CliCommand, CliContext};
use crate::cli::{create_table, CliError, MessageType, OutputFormat, TableDisplay};
use crate::grouping::group_with_resolver;
use crate::models::{DetectionResult, EditorGroup, ScanStatus};
use crate::scan::{InstrumentDetector, ParallelDetector, ProjectPathScanner};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub struct ScanCommand {
    pub paths: Vec<PathBuf>,
    pub group: bool,
    pub threads: usize,
}

/// Detection summary for one project file
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub path: String,
    pub status: ScanStatus,
    pub instruments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<EditorGroup>>,
}

impl CliCommand for ScanCommand {
    fn execute(&self, ctx: &CliContext) -> Result<(), CliError> {
        let files = self.collect_project_files(ctx);
        if files.is_empty() {
            ctx.output
                .print_message("No project files to scan", MessageType::Warning);
            return Ok(());
        }

        let catalog = ctx.load_catalog()?;
        if catalog.is_empty() {
            ctx.output.print_message(
                &format!(
                    "The catalog at {} is empty, nothing can be detected",
                    catalog.path().display()
                ),
                MessageType::Warning,
            );
        }

        let show_progress = ctx.output.format() == OutputFormat::Table;
        let results = if self.threads <= 1 || files.len() == 1 {
            scan_sequential(&catalog, &files, show_progress)?
        } else {
            scan_parallel(&catalog, files, self.threads, show_progress)?
        };

        let resolver = catalog.resolver()?;
        let total = results.len();
        let mut failed = 0usize;
        let mut reports: Vec<ScanReport> = Vec::with_capacity(total);
        for (path, outcome) in results {
            match outcome {
                Ok(result) => {
                    let groups = self
                        .group
                        .then(|| group_with_resolver(&result.instruments, &resolver));
                    reports.push(ScanReport {
                        path: path.display().to_string(),
                        status: result.status,
                        instruments: result.sorted(),
                        groups,
                    });
                }
                Err(err) => {
                    failed += 1;
                    ctx.output.print_message(
                        &format!("Failed to scan {}: {}", path.display(), err),
                        MessageType::Error,
                    );
                }
            }
        }
        reports.sort_by(|a, b| a.path.cmp(&b.path));

        ctx.output.print(&reports)?;

        // An unreadable project is not the same as a project without instruments
        if failed > 0 {
            return Err(format!("{} of {} project(s) could not be scanned", failed, total).into());
        }
        Ok(())
    }
}

impl ScanCommand {
    /// Expands folders into the projects they contain; files are kept as given
    fn collect_project_files(&self, ctx: &CliContext) -> Vec<PathBuf> {
        let scanner = ProjectPathScanner::new();

        if self.paths.is_empty() {
            debug!("No paths given, using configured project folders");
            return scanner.scan_directories(&ctx.config.project_dirs());
        }

        let mut files = Vec::new();
        for path in &self.paths {
            if path.is_dir() {
                files.extend(scanner.scan_directory(path));
            } else {
                files.push(path.clone());
            }
        }
        files.dedup();
        files
    }
}

type FileOutcome = (PathBuf, Result<DetectionResult, CliError>);

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
    {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn scan_sequential(
    catalog: &KnownInstrumentCatalog,
    files: &[PathBuf],
    show_progress: bool,
) -> Result<Vec<FileOutcome>, CliError> {
    let detector = InstrumentDetector::new(catalog.records())?;
    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        let bar = progress_bar(100, show_progress);
        bar.set_message(file_label(path));

        let result = detector.scan_file_with_progress(
            path,
            Some(|percent: u8| {
                bar.set_position(u64::from(percent));
                true
            }),
        );
        bar.finish_and_clear();

        outcomes.push((path.clone(), result.map_err(CliError::from)));
    }

    Ok(outcomes)
}

fn scan_parallel(
    catalog: &KnownInstrumentCatalog,
    files: Vec<PathBuf>,
    threads: usize,
    show_progress: bool,
) -> Result<Vec<FileOutcome>, CliError> {
    let expected = files.len();
    let detector = ParallelDetector::new(threads, catalog.records().to_vec());
    debug!(
        "Scanning {} projects on {} threads",
        expected,
        detector.thread_count()
    );
    detector.submit_paths(files)?;

    let bar = progress_bar(expected as u64, show_progress);
    bar.set_message("Scanning projects");

    let mut outcomes = Vec::with_capacity(expected);
    while outcomes.len() < expected {
        let Ok(outcome) = detector.get_results_receiver().recv() else {
            warn!("Workers stopped before all projects were scanned");
            break;
        };
        bar.inc(1);
        outcomes.push(match outcome {
            Ok((path, result)) => (path, Ok(result)),
            Err((path, err)) => (path, Err(CliError::from(err))),
        });
    }
    bar.finish_and_clear();

    Ok(outcomes)
}

impl TableDisplay for Vec<ScanReport> {
    fn to_table(&self) -> Table {
        let mut table = create_table(vec!["Project", "Status", "Instruments"]);
        for report in self {
            let instruments = match &report.groups {
                Some(groups) => groups
                    .iter()
                    .map(|group| format!("{}: {}", group.editor, group.names.join(", ")))
                    .collect::<Vec<_>>()
                    .join("\n"),
                None => report.instruments.join("\n"),
            };
            let status = match report.status {
                ScanStatus::Completed => "completed",
                ScanStatus::Cancelled => "cancelled",
            };
            table.add_row(vec![report.path.clone(), status.to_string(), instruments]);
        }
        table
    }

    fn to_csv<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> Result<(), CliError> {
        writer.write_record(["project", "editor", "instrument"])?;
        for report in self {
            match &report.groups {
                Some(groups) => {
                    for group in groups {
                        for name in &group.names {
                            writer.write_record([
                                report.path.as_str(),
                                group.editor.as_str(),
                                name.as_str(),
                            ])?;
                        }
                    }
                }
                None => {
                    for name in &report.instruments {
                        writer.write_record([report.path.as_str(), "", name.as_str()])?;
                    }
                }
            }
        }
        Ok(())
    }
}
