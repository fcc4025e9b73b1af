use std::error::Error as StdError;
use std::fmt;

/// The kind of an error (non-exhaustive)
#[non_exhaustive]
#[derive(Debug)]
pub enum ErrorKind {
    /// Generic error
    Msg(String),
    /// A template was requested by name but was never loaded
    TemplateNotFound(String),
    /// A row list was given for a block that has no `{@each:name}`/`{@endeach:name}` pair
    MissingBlock(String),
    /// The `{@endeach:name}` of a block comes before its `{@each:name}`, or blocks are nested
    MalformedBlock(String),
    /// A value could not be turned into a scalar or a row list
    InvalidValue(String),
    /// An IO error occurred while reading a template
    Io(std::io::ErrorKind),
    /// An error happened while serializing data to JSON
    Json(serde_json::Error),
}

/// The Error type
#[derive(Debug)]
pub struct Error {
    /// Kind of error
    pub kind: ErrorKind,
    source: Option<Box<dyn StdError + Sync + Send>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Msg(ref message) => write!(f, "{}", message),
            ErrorKind::TemplateNotFound(ref name) => write!(f, "Template '{}' not found", name),
            ErrorKind::MissingBlock(ref name) => write!(
                f,
                "Block `{}` not found: the template needs both `{{@each:{}}}` and `{{@endeach:{}}}`",
                name, name, name
            ),
            ErrorKind::MalformedBlock(ref name) => {
                write!(f, "Block `{}` is malformed: `{{@endeach:{}}}` must follow `{{@each:{}}}`", name, name, name)
            }
            ErrorKind::InvalidValue(ref message) => write!(f, "Invalid value: {}", message),
            ErrorKind::Io(ref io_error) => {
                write!(f, "Io error while reading template: {:?}", io_error)
            }
            ErrorKind::Json(ref e) => write!(f, "{}", e),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|c| &**c as &(dyn StdError + 'static))
    }
}

impl Error {
    /// Creates generic error
    pub fn msg(value: impl ToString) -> Self {
        Self { kind: ErrorKind::Msg(value.to_string()), source: None }
    }

    /// Creates generic error with a source
    pub fn chain(value: impl ToString, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self { kind: ErrorKind::Msg(value.to_string()), source: Some(source.into()) }
    }

    /// Creates an error wrapping a failed read of the template at `path`
    pub fn io_error(error: std::io::Error, path: impl fmt::Display) -> Self {
        Self::chain(
            format!("Error loading template file: {}", path),
            Self { kind: ErrorKind::Io(error.kind()), source: Some(Box::new(error)) },
        )
    }

    /// Creates a template not found error
    pub fn template_not_found(tpl: impl ToString) -> Self {
        Self { kind: ErrorKind::TemplateNotFound(tpl.to_string()), source: None }
    }

    /// Creates a missing block error
    pub fn missing_block(name: impl ToString) -> Self {
        Self { kind: ErrorKind::MissingBlock(name.to_string()), source: None }
    }

    /// Creates a malformed block error
    pub fn malformed_block(name: impl ToString) -> Self {
        Self { kind: ErrorKind::MalformedBlock(name.to_string()), source: None }
    }

    /// Creates an invalid value error
    pub fn invalid_value(message: impl ToString) -> Self {
        Self { kind: ErrorKind::InvalidValue(message.to_string()), source: None }
    }

    /// Creates JSON error
    pub fn json(value: serde_json::Error) -> Self {
        Self { kind: ErrorKind::Json(value), source: None }
    }

    /// Whether this error comes from a block that cannot be expanded.
    ///
    /// Those errors mean the template and the values disagree about the blocks
    /// and the render has been abandoned: no part of the output is usable.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, ErrorKind::MissingBlock(_) | ErrorKind::MalformedBlock(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self { kind: ErrorKind::Io(error.kind()), source: Some(Box::new(error)) }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error)
    }
}

impl From<&str> for Error {
    fn from(e: &str) -> Self {
        Self::msg(e)
    }
}

impl From<String> for Error {
    fn from(e: String) -> Self {
        Self::msg(e)
    }
}

/// Convenient wrapper around std::Result.
pub type Result<T> = ::std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_send_and_sync() {
        fn test_send_sync<T: Send + Sync>() {}

        test_send_sync::<super::Error>();
    }

    #[test]
    fn block_errors_are_fatal() {
        assert!(Error::missing_block("rows").is_fatal());
        assert!(Error::malformed_block("rows").is_fatal());
        assert!(!Error::template_not_found("index.html").is_fatal());
        assert!(!Error::msg("oops").is_fatal());
    }

    #[test]
    fn missing_block_message_names_both_markers() {
        assert_eq!(
            Error::missing_block("rows").to_string(),
            "Block `rows` not found: the template needs both `{@each:rows}` and `{@endeach:rows}`"
        );
    }

    #[test]
    fn io_error_keeps_the_load_message_and_source() {
        let err = Error::io_error(
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            "missing.html",
        );
        assert_eq!(err.to_string(), "Error loading template file: missing.html");
        let source = err.source().unwrap().downcast_ref::<Error>().unwrap();
        assert!(matches!(source.kind, ErrorKind::Io(std::io::ErrorKind::NotFound)));
    }
}
