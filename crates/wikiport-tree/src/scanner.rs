//! Source tree discovery by filesystem walking.
//!
//! The walker is the only part of the pipeline that reads source files. It
//! classifies every entry under the root as a page (`.md`) or an asset
//! (anything else), reads page bodies into memory, and returns an immutable
//! [`WikiTree`]. Entries are visited in sorted name order so downstream
//! processing and reports are reproducible run to run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::tree::{Asset, Page, PageId, WikiTree};

/// Fatal failures while walking the source tree.
///
/// Anything recoverable (an unreadable file, a skipped directory) is
/// reported through [`Diagnostics`] instead.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The source root does not exist or is not a directory.
    #[error("source root not found: {}", .0.display())]
    MissingRoot(PathBuf),
    /// The source root exists but could not be read.
    #[error("failed to read source root {}: {source}", .path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Walk configuration.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Stem of the conventional entry page at the tree root, matched
    /// case-insensitively ("home" matches `Home.md`).
    pub entry_page: String,
    /// Directory names skipped entirely, at any depth.
    pub exclude: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            entry_page: "home".to_owned(),
            exclude: Vec::new(),
        }
    }
}

/// Walk `root` and build the page graph.
///
/// Hidden entries (leading `.`) and directories named in
/// [`WalkOptions::exclude`] are skipped. A missing or unreadable root is
/// fatal; unreadable entries further down are reported and skipped.
pub fn walk(
    root: &Path,
    options: &WalkOptions,
    diagnostics: &mut Diagnostics,
) -> Result<WikiTree, WalkError> {
    if !root.is_dir() {
        return Err(WalkError::MissingRoot(root.to_path_buf()));
    }
    let entries = sorted_entries(root).map_err(|source| WalkError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut tree = WikiTree::new(root.to_path_buf());
    collect(entries, "", options, &mut tree, diagnostics);

    match find_entry_page(&tree, &options.entry_page) {
        Some(id) => tree.set_entry(id),
        None => diagnostics.report(Diagnostic::MissingEntryPage {
            expected: options.entry_page.clone(),
        }),
    }

    tracing::debug!(
        pages = tree.page_count(),
        assets = tree.asset_count(),
        "Walked source tree"
    );
    Ok(tree)
}

/// A directory entry with its metadata resolved up front.
struct RawEntry {
    path: PathBuf,
    name: String,
    is_dir: bool,
}

/// Read a directory and sort its entries by name.
///
/// Sorting here is what makes page ids, reports, and output ordering
/// independent of the platform's directory iteration order.
fn sorted_entries(dir: &Path) -> io::Result<Vec<RawEntry>> {
    let mut entries: Vec<RawEntry> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|e| RawEntry {
            path: e.path(),
            name: e.file_name().to_string_lossy().into_owned(),
            is_dir: e.file_type().is_ok_and(|t| t.is_dir()),
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn collect(
    entries: Vec<RawEntry>,
    prefix: &str,
    options: &WalkOptions,
    tree: &mut WikiTree,
    diagnostics: &mut Diagnostics,
) {
    for entry in entries {
        if entry.name.starts_with('.') {
            continue;
        }

        if entry.is_dir {
            if options.exclude.iter().any(|d| *d == entry.name) {
                tracing::debug!(dir = %entry.name, "Skipping excluded directory");
                continue;
            }
            let child_prefix = join(prefix, &entry.name);
            match sorted_entries(&entry.path) {
                Ok(children) => collect(children, &child_prefix, options, tree, diagnostics),
                Err(error) => {
                    tracing::warn!(path = %child_prefix, error = %error, "Failed to read directory");
                    diagnostics.report(Diagnostic::UnreadableEntry { path: child_prefix });
                }
            }
        } else if entry.path.extension().is_some_and(|e| e == "md") {
            let rel_path = join(prefix, &entry.name);
            let stem = entry.name.strip_suffix(".md").unwrap_or(&entry.name);
            let route = join(prefix, stem);
            match fs::read_to_string(&entry.path) {
                Ok(body) => {
                    tree.push_page(Page {
                        route,
                        rel_path,
                        body,
                    });
                }
                Err(error) => {
                    tracing::warn!(path = %rel_path, error = %error, "Failed to read page");
                    diagnostics.report(Diagnostic::UnreadableEntry { path: rel_path });
                }
            }
        } else {
            tree.push_asset(Asset {
                rel_path: join(prefix, &entry.name),
                source_path: entry.path,
            });
        }
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Find the top-level page whose route matches the configured entry stem,
/// ignoring case.
fn find_entry_page(tree: &WikiTree, expected: &str) -> Option<PageId> {
    tree.pages()
        .find(|(_, page)| {
            !page.route.contains('/') && page.route.eq_ignore_ascii_case(expected)
        })
        .map(|(id, _)| id)
}
