use serde::{Deserialize, Serialize};

/// The broad category of a failure, which decides nothing by itself but tells the caller
/// whether the parameters, the input values, the filesystem or the PDF encoding was at fault.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself cannot be rendered, whatever the symbology.
    Parameter,
    /// A barcode value could not be represented by the symbology.
    Encoding,
    /// The output file could not be created or written.
    Io,
    /// The PDF document itself could not be assembled or serialized.
    Document,
}

/// A struct that represents an error with a context and possibly the propagated source error.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContextError {
    pub kind: ErrorKind,
    pub context: String,
    pub source_error: Option<String>,
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source_error {
            Some(source_error) => write!(
                formatter,
                "{}: {}",
                self.context,
                minimize_first_letter(source_error.to_string()),
            ),
            None => write!(formatter, "{}", self.context),
        }
    }
}

impl std::error::Error for ContextError {}

impl ContextError {
    /// Create a new `ContextError` of the given kind with the given context.
    pub fn with_context<S: Into<String>>(kind: ErrorKind, context: S) -> ContextError {
        ContextError {
            kind,
            context: context.into(),
            source_error: None,
        }
    }

    /// Create a new `ContextError` of the given kind with the given context and source error.
    pub fn with_error<S: Into<String>>(
        kind: ErrorKind,
        context: S,
        error: &dyn std::error::Error,
    ) -> ContextError {
        ContextError {
            kind,
            context: context.into(),
            source_error: Some(error.to_string()),
        }
    }
}

/// Minimizes the first letter of a string, it is used for standardizing the error message.
fn minimize_first_letter(string: String) -> String {
    let mut characters = string.chars();
    match characters.next() {
        None => String::new(),
        Some(character) => character.to_lowercase().chain(characters).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lowercases_the_propagated_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file");
        let error = ContextError::with_error(ErrorKind::Io, "Failed to create the output file", &io_error);

        assert_eq!(error.kind, ErrorKind::Io);
        assert_eq!(
            error.to_string(),
            "Failed to create the output file: no such file"
        );
    }

    #[test]
    fn display_without_source_is_only_the_context() {
        let error = ContextError::with_context(ErrorKind::Encoding, "Unsupported character");
        assert_eq!(error.to_string(), "Unsupported character");
        assert!(error.source_error.is_none());
    }
}
