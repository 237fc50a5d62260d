//! Decoding of geodata buffers into tag groups.

use log::debug;
use prost::Message;

use super::format::{Cidr, Domain, DomainType, GeoIp, GeoIpList, GeoSite, GeoSiteList};
use crate::{Error, GeoKind, Result};

/// Decoded geodata database.
///
/// Exactly one variant is populated, selected by the kind the caller
/// declared. Groups keep the order they had in the buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoDatabase {
    /// Domain rule groups from a `geosite` buffer.
    SiteList(Vec<SiteGroup>),
    /// IP prefix groups from a `geoip` buffer.
    IpList(Vec<IpGroup>),
}

impl GeoDatabase {
    /// Decode a buffer as the given kind.
    ///
    /// Fails with [`Error::Decode`] when the buffer is not a valid list
    /// message; nothing is returned for a partially valid buffer.
    pub fn decode(bytes: &[u8], kind: GeoKind) -> Result<Self> {
        let db = match kind {
            GeoKind::GeoSite => {
                let list = GeoSiteList::decode(bytes)
                    .map_err(|source| Error::Decode { kind, source })?;
                GeoDatabase::SiteList(list.entry.into_iter().map(SiteGroup::from).collect())
            }
            GeoKind::GeoIp => {
                let list =
                    GeoIpList::decode(bytes).map_err(|source| Error::Decode { kind, source })?;
                GeoDatabase::IpList(list.entry.into_iter().map(IpGroup::from).collect())
            }
        };

        debug!(
            "decoded {} bytes as {}: {} groups",
            bytes.len(),
            kind,
            db.group_count()
        );
        Ok(db)
    }

    /// Number of groups, including ones with a blank tag.
    pub fn group_count(&self) -> usize {
        match self {
            GeoDatabase::SiteList(groups) => groups.len(),
            GeoDatabase::IpList(groups) => groups.len(),
        }
    }
}

/// Decode a buffer, parsing the kind string first.
///
/// An unknown kind fails with [`Error::InvalidKind`] before the buffer is read.
pub fn decode(bytes: &[u8], kind: &str) -> Result<GeoDatabase> {
    let kind = GeoKind::parse(kind)?;
    GeoDatabase::decode(bytes, kind)
}

/// Common view over site and IP groups.
pub trait Group {
    /// Entry type stored in the group.
    type Entry;

    /// Tag as stored (case preserved, untrimmed).
    fn tag(&self) -> &str;

    /// Raw entries in stored order.
    fn entries(&self) -> &[Self::Entry];

    /// Number of raw entries.
    fn entry_count(&self) -> usize {
        self.entries().len()
    }

    /// Tag with surrounding whitespace removed; `None` when blank.
    fn visible_tag(&self) -> Option<&str> {
        let tag = self.tag().trim();
        (!tag.is_empty()).then_some(tag)
    }
}

/// Find the first group whose tag equals `wanted` ignoring case.
///
/// The stored tag is compared as stored, so `" cn "` does not match `cn`.
/// Groups with a blank tag never match. When a file carries the same tag
/// more than once only the first group is reachable.
pub fn find_group<'a, G: Group>(groups: &'a [G], wanted: &str) -> Option<&'a G> {
    let wanted = wanted.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    groups
        .iter()
        .find(|g| g.visible_tag().is_some() && g.tag().to_lowercase() == wanted)
}

/// Site group: one tag and its domain rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteGroup {
    pub tag: String,
    pub domains: Vec<DomainRule>,
}

impl Group for SiteGroup {
    type Entry = DomainRule;

    fn tag(&self) -> &str {
        &self.tag
    }

    fn entries(&self) -> &[DomainRule] {
        &self.domains
    }
}

impl From<GeoSite> for SiteGroup {
    fn from(site: GeoSite) -> Self {
        Self {
            tag: site.country_code,
            domains: site.domain.into_iter().map(DomainRule::from).collect(),
        }
    }
}

/// Domain rule as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRule {
    /// Raw `Domain.Type` value; may be outside the known enum.
    pub match_type: i32,
    pub value: String,
    /// Attribute keys, in stored order.
    pub attributes: Vec<String>,
}

impl DomainRule {
    /// Known match type, if the raw value is one.
    pub fn domain_type(&self) -> Option<DomainType> {
        DomainType::try_from(self.match_type).ok()
    }
}

impl From<Domain> for DomainRule {
    fn from(domain: Domain) -> Self {
        Self {
            match_type: domain.r#type,
            value: domain.value,
            attributes: domain.attribute.into_iter().map(|a| a.key).collect(),
        }
    }
}

/// IP group: one tag and its prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpGroup {
    pub tag: String,
    pub cidrs: Vec<CidrRule>,
}

impl Group for IpGroup {
    type Entry = CidrRule;

    fn tag(&self) -> &str {
        &self.tag
    }

    fn entries(&self) -> &[CidrRule] {
        &self.cidrs
    }
}

impl From<GeoIp> for IpGroup {
    fn from(ip: GeoIp) -> Self {
        Self {
            tag: ip.country_code,
            cidrs: ip.cidr.into_iter().map(CidrRule::from).collect(),
        }
    }
}

/// IP prefix as stored: raw address bytes and prefix length.
///
/// Only 4- and 16-byte addresses are renderable; other lengths are kept
/// so that entry counts stay exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidrRule {
    pub ip: Vec<u8>,
    pub prefix: u32,
}

impl From<Cidr> for CidrRule {
    fn from(cidr: Cidr) -> Self {
        Self {
            ip: cidr.ip,
            prefix: cidr.prefix,
        }
    }
}
