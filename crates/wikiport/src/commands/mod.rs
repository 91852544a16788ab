//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod export;

pub(crate) use check::CheckArgs;
pub(crate) use export::ExportArgs;

use wikiport_tree::Diagnostics;

use crate::error::CliError;
use crate::output::Output;

/// Common command epilogue: surface the warning count and honor strict mode.
pub(crate) fn finish(
    output: &Output,
    diagnostics: &Diagnostics,
    strict: bool,
) -> Result<(), CliError> {
    let count = diagnostics.len();
    if count == 0 {
        return Ok(());
    }

    let noun = if count == 1 { "warning" } else { "warnings" };
    output.warning(&format!("{count} {noun}"));

    if strict {
        return Err(CliError::Strict(format!("{count} {noun} (strict mode)")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikiport_tree::Diagnostic;

    fn warned() -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(Diagnostic::UnresolvedLink {
            page: "home.md".to_owned(),
            target: "missing.md".to_owned(),
        });
        diagnostics
    }

    #[test]
    fn test_finish_clean_run() {
        let output = Output::new();
        assert!(finish(&output, &Diagnostics::new(), true).is_ok());
    }

    #[test]
    fn test_finish_warnings_without_strict() {
        let output = Output::new();
        assert!(finish(&output, &warned(), false).is_ok());
    }

    #[test]
    fn test_finish_warnings_with_strict() {
        let output = Output::new();
        let err = finish(&output, &warned(), true).unwrap_err();
        assert!(matches!(err, CliError::Strict(_)));
        assert!(err.to_string().contains("strict mode"));
    }
}
