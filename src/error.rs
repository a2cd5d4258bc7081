use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;
use url::Url;
use xml::common::Position;
use xml::reader::Error as XmlError;

/// Error returned by the WebDAV operations
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("WebDAV request failed")]
    Transport(#[from] TransportError),
    #[error("failed to parse multistatus response")]
    Parse(#[from] ParseError),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> ClientError {
        ClientError::Transport(TransportError::Http(e))
    }
}

impl From<BuildClientError> for ClientError {
    fn from(e: BuildClientError) -> ClientError {
        ClientError::Transport(TransportError::Build(e))
    }
}

/// A failure reported by the HTTP layer
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failure, timeout, unreadable body, or similar
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The server answered with a status outside of the 2xx range
    #[error("server returned {status} for {url}")]
    Status { url: Url, status: StatusCode },

    /// A default client could not be constructed for a one-off request
    #[error(transparent)]
    Build(#[from] BuildClientError),
}

/// Error returned by [`Client::new()`][crate::Client::new]
#[derive(Debug, Error)]
#[error("failed to initialize HTTP client")]
pub struct BuildClientError(#[source] pub(crate) reqwest::Error);

/// The response body was not well-formed XML
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    failures: Vec<ParseFailure>,
}

impl ParseError {
    pub(crate) fn new(failures: Vec<ParseFailure>) -> ParseError {
        ParseError { failures }
    }

    /// The individual problems found in the document.  Never empty.
    pub fn failures(&self) -> &[ParseFailure] {
        &self.failures
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "response body is not valid XML")?;
        for failure in &self.failures {
            write!(f, "; {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<XmlError> for ParseError {
    fn from(e: XmlError) -> ParseError {
        ParseError {
            failures: vec![ParseFailure::from(e)],
        }
    }
}

/// A single problem found while parsing XML, with its 1-based location
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseFailure {
    pub row: u64,
    pub column: u64,
    pub problem: String,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.row, self.column, self.problem)
    }
}

impl From<XmlError> for ParseFailure {
    fn from(e: XmlError) -> ParseFailure {
        // xml-rs positions are 0-based
        let pos = e.position();
        ParseFailure {
            row: pos.row.saturating_add(1),
            column: pos.column.saturating_add(1),
            problem: e.msg().to_owned(),
        }
    }
}
