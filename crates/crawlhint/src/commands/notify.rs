//! `crawlhint` notification run.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use crawlhint_config::{Config, Credentials};
use crawlhint_content::{ContentUrl, Mapping, MappingOutcome, UrlMapper, collect_urls};
use crawlhint_notify::http_agent;
use crawlhint_vcs::{ChangeDetector, ContentFilter, RevisionRange};
use tracing::info;

use crate::error::CliError;
use crate::output::Output;
use crate::pipeline::{StageOutcome, StagePlan, StageReport, plan_stages, run_stages};

/// Arguments for a notification run.
#[derive(Args)]
pub(crate) struct NotifyArgs {
    /// Repository to inspect (default: current directory).
    #[arg(short, long, default_value = ".")]
    repo: PathBuf,

    /// Path to configuration file (default: auto-discover crawlhint.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Older revision of the compared range.
    #[arg(long, default_value = "HEAD~1")]
    base: String,

    /// Newer revision of the compared range.
    #[arg(long, default_value = "HEAD")]
    head: String,

    /// List URLs and planned notifiers without contacting any endpoint.
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// What a run did, for callers that inspect it.
#[derive(Debug, Default)]
pub(crate) struct RunSummary {
    pub(crate) mappings: Vec<Mapping>,
    pub(crate) urls: Vec<ContentUrl>,
    pub(crate) reports: Vec<StageReport>,
}

impl RunSummary {
    /// HTTP calls that did not succeed, across all stages.
    pub(crate) fn failed_calls(&self) -> usize {
        self.reports
            .iter()
            .flat_map(StageReport::submissions)
            .filter(|submission| !submission.is_ok())
            .count()
    }

    /// Closing line for a run that reached the notifiers.
    pub(crate) fn completion_message(&self) -> Option<String> {
        if self.reports.is_empty() {
            return None;
        }
        let calls: usize = self.reports.iter().map(|r| r.submissions().len()).sum();
        Some(format!(
            "Done: {} URL(s) from {} changed file(s), {} of {calls} call(s) failed.",
            self.urls.len(),
            self.mappings.len(),
            self.failed_calls(),
        ))
    }
}

impl NotifyArgs {
    /// Execute the notification run with credentials from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the revision history
    /// cannot be queried. Notifier failures are reported, not returned.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let summary = self.run(&Credentials::from_env(), &output)?;
        if let Some(message) = summary.completion_message() {
            if summary.failed_calls() == 0 {
                output.success(&message);
            } else {
                output.warning(&message);
            }
        }
        Ok(())
    }

    pub(crate) fn run(
        &self,
        credentials: &Credentials,
        output: &Output,
    ) -> Result<RunSummary, CliError> {
        let detector = ChangeDetector::open(&self.repo)?;
        let config = Config::load(self.config.as_deref(), detector.workdir())?;
        if let Some(path) = &config.config_path {
            info!("Loaded configuration from {}", path.display());
        }

        let filter = ContentFilter::new(
            config.site.content_paths.iter().cloned(),
            &config.site.extension,
        );
        let range = RevisionRange {
            base: self.base.clone(),
            head: self.head.clone(),
        };
        let changed = detector.changed_files(&range, &filter)?;

        if changed.is_empty() {
            output.info("No content files changed. Nothing to do.");
            return Ok(RunSummary::default());
        }

        output.info(&format!("Changed content files ({}):", changed.len()));
        let mapper = UrlMapper::new(detector.workdir(), &config.site.origin);
        let mappings = mapper.map_all(changed.iter().map(|file| file.path.as_str()));
        print_mappings(output, &mappings);

        let urls = collect_urls(&mappings);
        if urls.is_empty() {
            output.info("No URLs to submit.");
            return Ok(RunSummary {
                mappings,
                ..RunSummary::default()
            });
        }

        let agent = http_agent(Duration::from_secs(config.http.timeout_secs));
        let stages = plan_stages(&config, credentials, &agent);

        if self.dry_run {
            output.section("Dry run");
            for stage in &stages {
                match &stage.plan {
                    StagePlan::Run(_) => output.info(&format!("  {}: would notify", stage.name)),
                    StagePlan::Skip(reason) => {
                        output.warning(&format!("  {}: skipped ({reason})", stage.name));
                    }
                }
            }
            return Ok(RunSummary {
                mappings,
                urls,
                reports: Vec::new(),
            });
        }

        let reports = run_stages(stages, &urls, |report| print_report(output, report));
        Ok(RunSummary {
            mappings,
            urls,
            reports,
        })
    }
}

fn print_mappings(output: &Output, mappings: &[Mapping]) {
    for mapping in mappings {
        match &mapping.outcome {
            MappingOutcome::Mapped(url) => output.info(&format!("  {} -> {url}", mapping.path)),
            MappingOutcome::NoPermalink => {
                output.warning(&format!("  {} -> [skipped, no permalink]", mapping.path));
            }
            MappingOutcome::Unreadable(reason) => {
                output.warning(&format!("  {} -> [skipped, {reason}]", mapping.path));
            }
        }
    }
}

fn print_report(output: &Output, report: &StageReport) {
    output.section(report.name);
    match &report.outcome {
        StageOutcome::Skipped(reason) => output.warning(&format!("  Skipped ({reason})")),
        StageOutcome::Completed(submissions) => {
            for submission in submissions {
                output.submission(submission);
            }
        }
    }
}
