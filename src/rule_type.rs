//! Rule type definitions.

use std::fmt;

/// RuleType represents the type of an IP-based rule line.
///
/// Only the types that take a `no-resolve` annotation are represented;
/// domain rules and anything unrecognized stay untyped and pass through
/// the pipeline unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    /// IPv4 CIDR range
    IpCidr,
    /// IPv6 CIDR range
    IpCidr6,
    /// Autonomous system number
    IpAsn,
    /// GeoIP country code
    GeoIp,
}

impl RuleType {
    /// Parse a rule type from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "IP-CIDR" => Some(RuleType::IpCidr),
            "IP-CIDR6" => Some(RuleType::IpCidr6),
            "IP-ASN" => Some(RuleType::IpAsn),
            "GEOIP" => Some(RuleType::GeoIp),
            _ => None,
        }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::IpCidr => "IP-CIDR",
            RuleType::IpCidr6 => "IP-CIDR6",
            RuleType::IpAsn => "IP-ASN",
            RuleType::GeoIp => "GEOIP",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
