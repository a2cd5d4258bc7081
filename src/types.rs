use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A resource listed in a WebDAV collection.  The URL is absolute, sharing
/// the scheme & authority of the URL that was listed.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum DirectoryEntry {
    File(Url),
    Directory(Url),
}

impl DirectoryEntry {
    pub fn url(&self) -> &Url {
        match self {
            DirectoryEntry::File(url) | DirectoryEntry::Directory(url) => url,
        }
    }

    pub fn into_url(self) -> Url {
        match self {
            DirectoryEntry::File(url) | DirectoryEntry::Directory(url) => url,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, DirectoryEntry::Directory(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self, DirectoryEntry::File(_))
    }
}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryEntry::File(url) => write!(f, "FILE: {url}"),
            DirectoryEntry::Directory(url) => write!(f, "DIR: {url}"),
        }
    }
}

/// The text of a file fetched from the server
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Content {
    /// The URL that was requested
    pub path: Url,
    /// The response body
    pub data: String,
}
