//! A minimal WebDAV client.
//!
//! `davlist` lists collections (`PROPFIND` with `Depth: 1`), creates
//! collections (`MKCOL`) and files (`PUT`), deletes resources (`DELETE`), and
//! reads text files (`GET`).  Each operation is a single HTTP request; nothing
//! is cached and nothing is retried.
//!
//! ```no_run
//! # async fn run() -> Result<(), davlist::ClientError> {
//! let client = davlist::Client::new()?;
//! for entry in client.list("https://dav.example.com/files/".parse().unwrap()).await? {
//!     println!("{entry}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Multistatus responses are matched on literal tag names using the `D:`
//! prefix for the `DAV:` namespace (`D:multistatus`, `D:response`, etc.);
//! listings from servers that use a different prefix come back empty.
mod client;
mod error;
pub mod multistatus;
mod request;
pub mod tree;
mod types;
pub use crate::client::*;
pub use crate::error::*;
pub use crate::types::*;
