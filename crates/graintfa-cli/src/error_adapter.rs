//! Error adapter for converting GraintfaError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use graintfa::GraintfaError;

/// Adapter rendering a [`GraintfaError`] as a miette diagnostic.
///
/// Each error variant maps to a stable diagnostic code and, where there is
/// something actionable to say, a help message.
pub struct ErrorAdapter<'a>(pub &'a GraintfaError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            GraintfaError::Io(_) => "graintfa::io",
            GraintfaError::Element(_) | GraintfaError::UnknownElement(_) => "graintfa::element",
            GraintfaError::Document(_) => "graintfa::document",
            GraintfaError::Config(_) => "graintfa::config",
            GraintfaError::Export(_) => "graintfa::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            GraintfaError::Document(_) => {
                "a scene document is {\"elementIndexCounter\": N, \"elements\": [...]} and its first element is the background"
            }
            GraintfaError::UnknownElement(_) => "run with --list-elements to see registered elements",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wrap a [`GraintfaError`] for rendering by a miette report handler.
pub fn to_reportable(err: &GraintfaError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

#[cfg(test)]
mod tests {
    use graintfa::identifier::ElementId;

    use super::*;

    fn code(err: &GraintfaError) -> Option<String> {
        to_reportable(err).code().map(|code| code.to_string())
    }

    #[test]
    fn test_codes_per_variant() {
        let io = GraintfaError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(code(&io).as_deref(), Some("graintfa::io"));

        let document = GraintfaError::Document("no elements".to_string());
        assert_eq!(code(&document).as_deref(), Some("graintfa::document"));

        let config = GraintfaError::Config("bad scale".to_string());
        assert_eq!(code(&config).as_deref(), Some("graintfa::config"));

        let unknown = GraintfaError::UnknownElement(ElementId::new("nope"));
        assert_eq!(code(&unknown).as_deref(), Some("graintfa::element"));
    }

    #[test]
    fn test_display_matches_error() {
        let err = GraintfaError::Document("no elements".to_string());
        let reportable = to_reportable(&err);

        assert_eq!(reportable.to_string(), "Scene document error: no elements");
        assert!(reportable.help().is_some());
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = GraintfaError::Io(std::io::Error::other("disk full"));
        assert!(to_reportable(&err).help().is_none());
    }
}
