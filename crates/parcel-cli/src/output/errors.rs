//! Error message formatting with actionable suggestions.

use std::error::Error;

use parcel_core::error::ParcelError;

use super::colors::ColorSupport;

/// Renders errors with `help:` hints and `caused by:` chains
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self::with_colors(ColorSupport::detect())
    }

    pub fn with_colors(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format an error with its suggestion and source chain
    pub fn format_error(&self, error: &ParcelError) -> String {
        let mut output = self.format_simple(&error.to_string());
        output.push('\n');

        if let Some(suggestion) = error.suggestion() {
            output.push_str(&format!("\n{}: {}\n", self.colors.dim("help"), suggestion));
        }

        let mut source = error.source();
        while let Some(cause) = source {
            output.push_str(&format!("\n{}: {}", self.colors.dim("caused by"), cause));
            source = cause.source();
        }

        output
    }

    /// Format a bare error message
    pub fn format_simple(&self, message: &str) -> String {
        format!("{}: {}", self.colors.red("error"), message)
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcel_core::types::Requirement;

    #[test]
    fn test_resolution_failure_lists_requirements_and_help() {
        let formatter = ErrorFormatter::with_colors(ColorSupport::disabled());
        let error = ParcelError::ResolutionFailed {
            unsatisfied: vec![Requirement::parse("baz", "1.0").unwrap()],
        };

        let rendered = formatter.format_error(&error);
        assert!(rendered.starts_with("error: Packages not found: baz(ver 1.0)\n"));
        assert!(rendered.contains("help: Run 'parcel list'"));
    }

    #[test]
    fn test_source_chain_is_rendered() {
        let formatter = ErrorFormatter::with_colors(ColorSupport::disabled());
        let error = ParcelError::io(
            "Failed to read update.yaml".to_string(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );

        let rendered = formatter.format_error(&error);
        assert!(rendered.contains("caused by: no such file"));
    }
}
