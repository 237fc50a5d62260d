//! geodat - Inspector for GeoSite/GeoIP `.dat` routing databases.
//!
//! This crate decodes the protobuf geodata files used by v2ray/xray style
//! routers and answers two questions about them without keeping the
//! database around: which tags exist (and how large they are), and what a
//! given window of one tag's entries looks like.
//!
//! # Features
//!
//! - **Schema decoding**: `GeoSiteList` / `GeoIPList` protobuf messages
//! - **Tag catalog**: per-tag entry counts, sorted case-insensitively
//! - **Paginated dumps**: clamped offset/limit windows over one tag
//! - **Normalized items**: domain rules and CIDRs rendered as text
//! - **File access**: memory-mapped reads, transparent gzip
//!
//! # Quick Start
//!
//! ```ignore
//! use geodat::report;
//!
//! // List tags
//! let tags = report::tags("geosite", "/opt/etc/xray/geosite.dat")?;
//! for stat in &tags.tags {
//!     println!("{} ({})", stat.tag, stat.count);
//! }
//!
//! // First page of one tag
//! let page = report::dump("geosite", "/opt/etc/xray/geosite.dat", "google", 0, 200)?;
//! assert!(page.total >= page.items.len());
//! ```
//!
//! # Lower-level API
//!
//! The report functions compose smaller pieces that can be used on an
//! in-memory buffer directly:
//!
//! ```
//! use geodat::{build_catalog, dump, GeoDatabase, GeoKind};
//!
//! let db = GeoDatabase::decode(&[], GeoKind::GeoIp).unwrap();
//! assert!(build_catalog(&db).is_empty());
//! assert!(dump(&db, "cn", 0, 200).is_err());
//! ```
//!
//! # Duplicate tags
//!
//! A file may carry the same tag (ignoring case) more than once. Lookups
//! return the first such group; later ones are listed by the catalog but
//! cannot be dumped.

mod error;
mod kind;

pub mod catalog;
pub mod dat;
pub mod dump;
pub mod normalize;
pub mod report;
pub mod source;

// Re-export core types
pub use error::{Error, ErrorClass, Result};
pub use kind::GeoKind;

pub use catalog::{build_catalog, TagStat};
pub use dat::{decode, GeoDatabase};
pub use dump::{dump, DumpWindow, Page, DEFAULT_LIMIT, MAX_LIMIT};
pub use normalize::{Normalize, OutputItem};
pub use report::{DumpResult, TagsResult};
pub use source::{DatInput, DatSource, FileMeta};
