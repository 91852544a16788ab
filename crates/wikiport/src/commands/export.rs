//! `wikiport export` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use wikiport_config::{CliSettings, Config};
use wikiport_export::{Convention, Exporter, FlatWiki, SiteGenerator};
use wikiport_tree::{Diagnostics, WalkOptions, walk};

use crate::commands::finish;
use crate::error::CliError;
use crate::output::Output;

/// Hosting convention selecting the destination layout.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum ConventionArg {
    /// Each page becomes a folder holding an index.md.
    SiteGenerator,
    /// Nested routes become separator-joined single-level names.
    FlatWiki,
}

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Source wiki root.
    source: PathBuf,

    /// Destination root for the exported tree.
    dest: PathBuf,

    /// Hosting convention for the destination layout.
    #[arg(long, value_enum)]
    convention: ConventionArg,

    /// Separator for flattened names (flat-wiki only, overrides config).
    #[arg(long)]
    separator: Option<String>,

    /// Treat warnings as errors.
    #[arg(long)]
    strict: bool,

    /// Path to configuration file (default: auto-discover wikiport.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, the walk, or the export fails,
    /// or if warnings were reported under strict mode.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            flat_separator: self.separator,
            strict: self.strict.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.highlight(&format!(
            "Exporting {} to {}",
            self.source.display(),
            self.dest.display()
        ));

        let options = WalkOptions {
            entry_page: config.tree.entry_page.clone(),
            exclude: config.tree.exclude.clone(),
        };
        let mut diagnostics = Diagnostics::new();
        let tree = walk(&self.source, &options, &mut diagnostics)?;
        output.info(&format!(
            "Found {} pages and {} assets",
            tree.page_count(),
            tree.asset_count()
        ));

        let convention: Box<dyn Convention> = match self.convention {
            ConventionArg::SiteGenerator => Box::new(SiteGenerator),
            ConventionArg::FlatWiki => {
                Box::new(FlatWiki::new(config.export.flat_separator.clone()))
            }
        };

        let report = Exporter::new(convention).export(&tree, &self.dest, &mut diagnostics)?;

        output.diagnostics(&diagnostics);
        output.success(&format!(
            "Exported {} pages and {} assets ({} links rewritten)",
            report.pages_written, report.assets_copied, report.links_rewritten
        ));

        finish(&output, &diagnostics, config.export.strict)
    }
}
