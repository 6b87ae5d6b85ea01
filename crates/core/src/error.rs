use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors that can occur while building or rendering output elements.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The payload did not contain the structure its MIME type promises.
    #[error("Malformed {mimetype} payload: {message}")]
    MalformedInput {
        /// MIME type the payload was rendered as
        mimetype: String,
        /// What was missing or wrong
        message: String,
    },
    /// An element could not be created because the tag name is invalid.
    #[error("Invalid element tag name: {tag:?}")]
    Creation {
        /// The rejected tag name
        tag: String,
    },
    /// No renderer is registered for the requested MIME type.
    #[error("No renderer registered for {0}")]
    UnsupportedMimetype(String),
    /// markdown-rs failed to convert the document.
    #[error("Markdown error at {location}: {message}")]
    Markdown {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// The HTML tokenizer rejected a fragment.
    #[error("HTML error: {0}")]
    Html(String),
    /// A MIME bundle could not be read.
    #[error("Invalid MIME bundle: {0}")]
    Bundle(String),
}

impl RenderError {
    /// Create a malformed input error for a MIME type
    pub fn malformed(mimetype: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            mimetype: mimetype.into(),
            message: message.into(),
        }
    }

    /// Create a creation error for a rejected tag
    pub fn creation(tag: impl Into<String>) -> Self {
        Self::Creation { tag: tag.into() }
    }

    /// Create a markdown error with location
    pub fn markdown(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Markdown {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }
}
