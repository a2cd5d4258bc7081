use crate::tree::{children_of, first_child_by_tag, first_text_value, Document, Node};
use crate::types::DirectoryEntry;
use std::fmt;
use url::Url;

// Tag names are matched literally, prefix included; servers that use a prefix
// other than `D:` for the DAV: namespace are not supported.
static MULTISTATUS: &str = "D:multistatus";
static HREF: &str = "D:href";
static PROPSTAT: &str = "D:propstat";
static PROP: &str = "D:prop";
static RESOURCETYPE: &str = "D:resourcetype";
static COLLECTION: &str = "D:collection";

/// Convert a parsed `PROPFIND` response into a list of directory entries.
///
/// `root` is the URL that was requested; each entry's URL is `root` with its
/// path replaced by the path of the entry's `<D:href>`.
///
/// The first child of `<D:multistatus>` describes the listed collection
/// itself and is not included.  Responses that cannot be converted (e.g.,
/// because they lack an href) are silently dropped; use
/// [`interpret_with_skipped()`] to find out about them.
pub fn interpret(doc: &Document, root: &Url) -> Vec<DirectoryEntry> {
    responses(doc)
        .iter()
        .filter_map(|node| to_entry(node, root).ok())
        .collect()
}

/// Like [`interpret()`], but also report which responses were dropped
pub fn interpret_with_skipped(doc: &Document, root: &Url) -> Interpretation {
    let mut entries = Vec::new();
    let mut skipped = Vec::new();
    // Index 0 is the discarded self-description
    for (index, node) in (1..).zip(responses(doc)) {
        match to_entry(node, root) {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                tracing::debug!(index, %reason, "Skipping multistatus response");
                skipped.push(Skipped { index, reason });
            }
        }
    }
    Interpretation { entries, skipped }
}

/// The result of [`interpret_with_skipped()`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Interpretation {
    /// The same entries that [`interpret()`] would return
    pub entries: Vec<DirectoryEntry>,
    /// The responses that did not produce an entry, in document order
    pub skipped: Vec<Skipped>,
}

/// A child of `<D:multistatus>` that did not produce an entry
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Skipped {
    /// Position of the node among the children of `<D:multistatus>`
    /// (counting the discarded first child as 0)
    pub index: usize,
    pub reason: SkipReason,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SkipReason {
    /// The node was text rather than an element
    NotAnElement,
    /// The response had no `<D:href>` or the href had no text
    MissingHref,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAnElement => write!(f, "node is not an element"),
            SkipReason::MissingHref => write!(f, "response has no href"),
        }
    }
}

/// The children of `<D:multistatus>` after the first
fn responses(doc: &Document) -> &[Node] {
    match first_child_by_tag(MULTISTATUS, doc.nodes()) {
        Some([_, rest @ ..]) => rest,
        _ => &[],
    }
}

fn to_entry(node: &Node, root: &Url) -> Result<DirectoryEntry, SkipReason> {
    let children = children_of(node).ok_or(SkipReason::NotAnElement)?;
    let href = first_child_by_tag(HREF, children)
        .and_then(first_text_value)
        .ok_or(SkipReason::MissingHref)?;
    let url = normalize(root, href);
    if is_collection(children) {
        Ok(DirectoryEntry::Directory(url))
    } else {
        Ok(DirectoryEntry::File(url))
    }
}

/// Replace the path of `root` with the path of `href`.  If `href` is not an
/// absolute URL, it is taken to be a path already.
fn normalize(root: &Url, href: &str) -> Url {
    let mut url = root.clone();
    match Url::parse(href) {
        Ok(u) => url.set_path(u.path()),
        Err(_) => url.set_path(href),
    }
    url
}

/// A response is a collection if `propstat/prop/resourcetype` contains
/// `<D:collection>`.  Anything else, including a response missing any of
/// those elements, counts as a file.
fn is_collection(response: &[Node]) -> bool {
    first_child_by_tag(PROPSTAT, response)
        .and_then(|ch| first_child_by_tag(PROP, ch))
        .and_then(|ch| first_child_by_tag(RESOURCETYPE, ch))
        .and_then(|ch| first_child_by_tag(COLLECTION, ch))
        .is_some()
}
