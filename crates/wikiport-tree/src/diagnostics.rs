//! Recoverable problem reporting.
//!
//! Fatal errors abort a run through `Result`; everything else is recorded
//! here and surfaced once, at the end, so a single broken link never hides
//! the rest of the report.

use std::fmt;

/// A recoverable problem encountered during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A relative link whose target is neither a page nor an asset.
    UnresolvedLink { page: String, target: String },
    /// The configured entry page was not found at the tree root.
    MissingEntryPage { expected: String },
    /// A page was excluded from the export.
    PageSkipped { page: String, reason: String },
    /// A file or directory could not be read during the walk.
    UnreadableEntry { path: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedLink { page, target } => {
                write!(f, "unresolved link in {page}: {target}")
            }
            Self::MissingEntryPage { expected } => {
                write!(f, "entry page '{expected}' not found at the tree root")
            }
            Self::PageSkipped { page, reason } => write!(f, "skipped {page}: {reason}"),
            Self::UnreadableEntry { path } => write!(f, "could not read {path}"),
        }
    }
}

/// Ordered collection of [`Diagnostic`]s, threaded through every phase.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Append another collection, preserving its internal order.
    pub fn absorb(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of unresolved-link diagnostics.
    pub fn unresolved_links(&self) -> usize {
        self.items
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnresolvedLink { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_preserves_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(Diagnostic::MissingEntryPage {
            expected: "home".to_owned(),
        });
        diagnostics.report(Diagnostic::UnresolvedLink {
            page: "home.md".to_owned(),
            target: "gone.md".to_owned(),
        });

        let rendered: Vec<_> = diagnostics.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "entry page 'home' not found at the tree root",
                "unresolved link in home.md: gone.md",
            ]
        );
    }

    #[test]
    fn test_absorb_appends_in_order() {
        let mut first = Diagnostics::new();
        first.report(Diagnostic::UnreadableEntry {
            path: "a".to_owned(),
        });

        let mut second = Diagnostics::new();
        second.report(Diagnostic::UnreadableEntry {
            path: "b".to_owned(),
        });
        second.report(Diagnostic::UnreadableEntry {
            path: "c".to_owned(),
        });

        first.absorb(second);
        let paths: Vec<_> = first.iter().map(ToString::to_string).collect();
        assert_eq!(
            paths,
            vec!["could not read a", "could not read b", "could not read c"]
        );
    }

    #[test]
    fn test_unresolved_link_count() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(diagnostics.unresolved_links(), 0);

        diagnostics.report(Diagnostic::UnresolvedLink {
            page: "a.md".to_owned(),
            target: "x.md".to_owned(),
        });
        diagnostics.report(Diagnostic::PageSkipped {
            page: "b.md".to_owned(),
            reason: "malformed link".to_owned(),
        });
        diagnostics.report(Diagnostic::UnresolvedLink {
            page: "c.md".to_owned(),
            target: "y.md".to_owned(),
        });

        assert_eq!(diagnostics.unresolved_links(), 2);
        assert_eq!(diagnostics.len(), 3);
    }
}
