//! Snapshot sources for ADEx auditing.
//!
//! A [`SnapshotSource`] hands out raw JSON documents; [`collect_snapshots`]
//! parses them into [`Snapshots`](adex_model::Snapshots), turning every
//! failure into an absent snapshot so a validation run can still proceed.
//!
//! Two sources are provided:
//!
//! - [`DirectorySource`] reads offline exports, one file per resource.
//! - [`HttpSource`] queries a running platform instance and, optionally, the
//!   release API of the metadata package and the app.

pub mod collect;
pub mod directory;
pub mod error;
pub mod http;
pub mod source;

pub use collect::{DEFAULT_APP_KEY, PROGRAM_INDICATOR_MARKER, PROGRAM_TARGET_MARKER, collect_snapshots};
pub use directory::DirectorySource;
pub use error::{FetchError, Result};
pub use http::{HttpSource, ReleaseUrls};
pub use source::{Resource, SnapshotSource};
