//! Wire schema of the v2ray `router` geodata messages.
//!
//! Field numbers and wire types are fixed by the producers of
//! `geosite.dat` / `geoip.dat` and must not change.

use std::borrow::Cow;

/// Domain matching type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum DomainType {
    /// The value is used as is (keyword).
    Plain = 0,
    /// The value is used as a regular expression.
    Regex = 1,
    /// The value is a root domain (suffix match).
    Domain = 2,
    /// The value is a full domain.
    Full = 3,
}

impl DomainType {
    /// Wire-level enum value name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainType::Plain => "Plain",
            DomainType::Regex => "Regex",
            DomainType::Domain => "Domain",
            DomainType::Full => "Full",
        }
    }

    /// Name for a raw enum value; unknown values render as their number.
    pub fn name_of(raw: i32) -> Cow<'static, str> {
        match DomainType::try_from(raw) {
            Ok(t) => Cow::Borrowed(t.as_str()),
            Err(_) => Cow::Owned(raw.to_string()),
        }
    }
}

/// Typed value of a domain attribute.
#[derive(Clone, PartialEq, ::prost::Oneof)]
pub enum AttributeValue {
    #[prost(bool, tag = "2")]
    BoolValue(bool),
    #[prost(int64, tag = "3")]
    IntValue(i64),
}

/// Attribute attached to a domain rule (`@ads`, `@cn`, ...).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DomainAttribute {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(oneof = "AttributeValue", tags = "2, 3")]
    pub typed_value: Option<AttributeValue>,
}

/// Single domain rule.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Domain {
    #[prost(enumeration = "DomainType", tag = "1")]
    pub r#type: i32,
    #[prost(string, tag = "2")]
    pub value: String,
    #[prost(message, repeated, tag = "3")]
    pub attribute: Vec<DomainAttribute>,
}

/// IP prefix; `ip` should be 4 or 16 bytes.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Cidr {
    #[prost(bytes = "vec", tag = "1")]
    pub ip: Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub prefix: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GeoSite {
    #[prost(string, tag = "1")]
    pub country_code: String,
    #[prost(message, repeated, tag = "2")]
    pub domain: Vec<Domain>,
    #[prost(bytes = "vec", tag = "3")]
    pub resource_hash: Vec<u8>,
    #[prost(string, tag = "4")]
    pub code: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GeoSiteList {
    #[prost(message, repeated, tag = "1")]
    pub entry: Vec<GeoSite>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GeoIp {
    #[prost(string, tag = "1")]
    pub country_code: String,
    #[prost(message, repeated, tag = "2")]
    pub cidr: Vec<Cidr>,
    #[prost(bool, tag = "3")]
    pub inverse_match: bool,
    #[prost(bytes = "vec", tag = "4")]
    pub resource_hash: Vec<u8>,
    #[prost(string, tag = "5")]
    pub code: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GeoIpList {
    #[prost(message, repeated, tag = "1")]
    pub entry: Vec<GeoIp>,
}
