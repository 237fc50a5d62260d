//! Conversion of stored entries into display items.
//!
//! Normalization never fails: an entry that cannot be rendered produces an
//! item with empty fields, so a single corrupt record never hides a page.

use log::warn;
use serde::Serialize;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::dat::{CidrRule, DomainRule, DomainType};

/// Item type used for every IP entry.
pub const CIDR_ITEM_TYPE: &str = "cidr";

/// Normalized dump item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputItem {
    /// Lower-case match type (`plain`, `regex`, `domain`, `full`, `cidr`)
    #[serde(rename = "t")]
    pub r#type: String,
    /// Display value: domain pattern, or `ip/prefix` for IP entries
    #[serde(rename = "v")]
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
    /// Domain attribute keys
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<String>,
}

/// Entries that can be rendered as an [`OutputItem`].
pub trait Normalize {
    fn normalize(&self) -> OutputItem;
}

impl Normalize for DomainRule {
    fn normalize(&self) -> OutputItem {
        let mut kind = DomainType::name_of(self.match_type).to_lowercase();
        if kind.is_empty() {
            kind = "domain".to_string();
        }
        OutputItem {
            r#type: kind,
            value: self.value.clone(),
            ip: None,
            prefix: None,
            cidr: None,
            attrs: self.attributes.clone(),
        }
    }
}

impl Normalize for CidrRule {
    fn normalize(&self) -> OutputItem {
        let ip = render_ip(&self.ip).unwrap_or_else(|| {
            warn!("unrenderable CIDR entry: {} address bytes", self.ip.len());
            String::new()
        });
        let cidr = if ip.is_empty() {
            String::new()
        } else {
            format!("{}/{}", ip, self.prefix)
        };
        OutputItem {
            r#type: CIDR_ITEM_TYPE.to_string(),
            value: cidr.clone(),
            ip: Some(ip),
            prefix: Some(self.prefix),
            cidr: Some(cidr),
            attrs: Vec::new(),
        }
    }
}

/// Render raw address bytes; only 4- and 16-byte addresses are valid.
///
/// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) render in dotted IPv4 form.
pub fn render_ip(bytes: &[u8]) -> Option<String> {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        return Some(Ipv4Addr::from(octets).to_string());
    }
    if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        let addr = Ipv6Addr::from(octets);
        return Some(match addr.to_ipv4_mapped() {
            Some(v4) => v4.to_string(),
            None => addr.to_string(),
        });
    }
    None
}
