//! Error types for fetching and extracting ePrint records.
//!
//! Three kinds of failure exist, one per stage of the pipeline:
//! - [`ValidationError`]: bad user input (an identifier, or a serialized record) caught before any I/O
//! - [`TransportError`]: the archive could not be reached or answered with a non-success status
//! - [`ExtractionError`]: the page was fetched but a required field could not be located
//!
//! None of them is retried. They all convert into [`Error`], which callers propagate with `?`.

use std::fmt;

use thiserror::Error;

/// Error type alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Any failure of the fetch-and-extract pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Malformed input, detected before any network or document work.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The identifier does not match any accepted form.
    #[error("expected an article id of the form '2009/123', got '{0}'")]
    Identifier(String),

    /// A record field violates its invariant (e.g. an empty title).
    #[error("record field `{field}` {reason}")]
    Field {
        field: &'static str,
        reason: &'static str,
    },

    /// A serialized record is missing a field or has one of the wrong type.
    #[error("malformed record: {0}")]
    Shape(#[from] serde_json::Error),
}

/// The archive could not deliver the page.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The server answered, but not with a 2xx status.
    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
}

/// The fields the extractor must find on every page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Title,
    Authors,
    Abstract,
    ShortUrl,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Title => "title",
            Field::Authors => "authors",
            Field::Abstract => "abstract",
            Field::ShortUrl => "short URL",
        })
    }
}

/// A required anchor is missing from the page, or its content is unusable.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not find the {0} in the document")]
    Missing(Field),

    #[error("malformed {field} in the document: {reason}")]
    Malformed { field: Field, reason: String },

    /// Every anchor was located but the assembled record is invalid (e.g. an empty author list).
    #[error("extracted record is invalid: {0}")]
    Invalid(#[from] ValidationError),
}

impl ExtractionError {
    /// The field this error is about, if it names one.
    pub fn field(&self) -> Option<Field> {
        match self {
            ExtractionError::Missing(field) | ExtractionError::Malformed { field, .. } => {
                Some(*field)
            }
            ExtractionError::Invalid(_) => None,
        }
    }
}
