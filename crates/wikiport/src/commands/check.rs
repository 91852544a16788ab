//! `wikiport check` command implementation.

use std::path::PathBuf;

use clap::Args;
use wikiport_config::{CliSettings, Config};
use wikiport_links::{LinkScanner, ResolvedTarget, resolve_target};
use wikiport_tree::{Diagnostic, Diagnostics, WalkOptions, walk};

use crate::commands::finish;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Source wiki root.
    source: PathBuf,

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

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Walks and resolves the tree exactly like an export would, but writes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the walk fails, or if warnings
    /// were reported under strict mode.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            strict: self.strict.then_some(true),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.highlight(&format!("Checking {}", self.source.display()));

        let options = WalkOptions {
            entry_page: config.tree.entry_page.clone(),
            exclude: config.tree.exclude.clone(),
        };
        let mut diagnostics = Diagnostics::new();
        let tree = walk(&self.source, &options, &mut diagnostics)?;

        let scanner = LinkScanner::new();
        let mut links_checked = 0;
        for (id, page) in tree.pages() {
            let occurrences = match scanner.scan(&page.body) {
                Ok(occurrences) => occurrences,
                Err(error) => {
                    diagnostics.report(Diagnostic::PageSkipped {
                        page: page.rel_path.clone(),
                        reason: error.to_string(),
                    });
                    continue;
                }
            };
            for occurrence in occurrences {
                links_checked += 1;
                if matches!(
                    resolve_target(&tree, id, &occurrence.target),
                    ResolvedTarget::Unresolved
                ) {
                    diagnostics.report(Diagnostic::UnresolvedLink {
                        page: page.rel_path.clone(),
                        target: occurrence.target,
                    });
                }
            }
        }

        output.diagnostics(&diagnostics);
        output.success(&format!(
            "Checked {} pages and {} links ({} unresolved)",
            tree.page_count(),
            links_checked,
            diagnostics.unresolved_links()
        ));

        finish(&output, &diagnostics, config.export.strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn args(dir: &Path, strict: bool) -> CheckArgs {
        let config = dir.join("wikiport.toml");
        fs::write(&config, "").unwrap();
        CheckArgs {
            source: dir.join("wiki"),
            strict,
            config: Some(config),
            verbose: false,
        }
    }

    fn write_wiki(dir: &Path, files: &[(&str, &str)]) {
        for (rel, body) in files {
            let full = dir.join("wiki").join(rel);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(full, body).unwrap();
        }
    }

    #[test]
    fn test_execute_clean_tree() {
        let dir = tempfile::tempdir().unwrap();
        write_wiki(
            dir.path(),
            &[
                ("home.md", "[about](home/about.md)\n"),
                ("home/about.md", "[back](../home.md)\n"),
            ],
        );

        args(dir.path(), true).execute().unwrap();
    }

    #[test]
    fn test_execute_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_wiki(dir.path(), &[("home.md", "[about](home/about.md)\n")]);

        let entries = |path: &Path| fs::read_dir(path).unwrap().filter_map(Result::ok).count();
        let before = entries(dir.path());

        args(dir.path(), false).execute().unwrap();

        // No destination tree appeared next to the source.
        assert_eq!(entries(dir.path()), before);
    }

    #[test]
    fn test_execute_strict_rejects_unresolved_links() {
        let dir = tempfile::tempdir().unwrap();
        write_wiki(dir.path(), &[("home.md", "[gone](missing.md)\n")]);

        let err = args(dir.path(), true).execute().unwrap_err();
        assert!(matches!(err, CliError::Strict(_)));

        // Without strict, unresolved links only warn.
        args(dir.path(), false).execute().unwrap();
    }
}
