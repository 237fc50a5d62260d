//! Geodata (`.dat`) decoding.
//!
//! A `.dat` file is a single protobuf list message. The two families
//! share the same outer shape:
//!
//! ```text
//! GeoSiteList                      GeoIPList
//! └─ entry (1) GeoSite             └─ entry (1) GeoIP
//!    ├─ country_code (1) string       ├─ country_code (1) string
//!    └─ domain (2) Domain             ├─ cidr (2) CIDR
//!       ├─ type (1) enum              │  ├─ ip (1) bytes
//!       ├─ value (2) string           │  └─ prefix (2) uint32
//!       └─ attribute (3)              └─ inverse_match (3) bool
//! ```

mod format;
mod reader;


pub use format::*;
pub use reader::{decode, find_group, CidrRule, DomainRule, GeoDatabase, Group, IpGroup, SiteGroup};
