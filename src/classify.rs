//! Line classification for upstream rule files.
//!
//! Each line of an upstream rule list is classified into one of three
//! kinds: blank/comment lines to skip, non-IP rules to pass through
//! unchanged, and IP-based rules carrying a rule type and CIDR/value.
//!
//! Two separate validity checks exist on purpose. The classifier's
//! `TYPE,VALUE` branch is loose and never inspects the value, because
//! annotation must preserve every recognized rule type including non-CIDR
//! ones (IP-ASN, GEOIP). The provider set builder re-validates values
//! independently with [`is_ipv4_cidr`] / [`is_ipv6_cidr`], because the
//! provider document can only hold literal CIDRs. Do not unify the two.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::RuleType;

static IPV4_CIDR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^((?:\d{1,3}\.){3}\d{1,3})/(\d{1,2})$").unwrap());

static IPV6_CIDR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F:]+/(\d{1,3})$").unwrap());

/// Check whether a string is a syntactically valid IPv4 CIDR.
///
/// Strict: exactly four dotted octets, each 0-255, prefix length 0-32.
pub fn is_ipv4_cidr(input: &str) -> bool {
    let Some(caps) = IPV4_CIDR_PATTERN.captures(input) else {
        return false;
    };

    let prefix_ok = caps[2].parse::<u8>().map(|n| n <= 32).unwrap_or(false);
    prefix_ok
        && caps[1]
            .split('.')
            .all(|octet| octet.parse::<u16>().map(|n| n <= 255).unwrap_or(false))
}

/// Check whether a string is IPv6-CIDR-shaped.
///
/// Permissive: any run of hex digits and colons followed by a prefix
/// length of at most 128. The address body is not shape-checked; upstream
/// lists are trusted for the body and only the prefix is bounded.
pub fn is_ipv6_cidr(input: &str) -> bool {
    let Some(caps) = IPV6_CIDR_PATTERN.captures(input) else {
        return false;
    };
    caps[1].parse::<u32>().map(|n| n <= 128).unwrap_or(false)
}

/// One classified line of upstream text.
///
/// The rule variant's fields are present exactly when the line was
/// recognized as an IP-based rule; `text` always carries the trimmed
/// original line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLine {
    /// Blank line or `#`/`//` comment, passed through verbatim.
    Skip { text: String },
    /// Non-IP rule or unrecognized content, passed through verbatim.
    Other { text: String },
    /// IP-based rule with its type and CIDR/value field.
    Rule {
        text: String,
        rule_type: RuleType,
        cidr: String,
    },
}

impl ClassifiedLine {
    /// The trimmed original line.
    pub fn text(&self) -> &str {
        match self {
            ClassifiedLine::Skip { text }
            | ClassifiedLine::Other { text }
            | ClassifiedLine::Rule { text, .. } => text,
        }
    }

    /// Whether this line was recognized as an IP-based rule.
    pub fn is_rule(&self) -> bool {
        matches!(self, ClassifiedLine::Rule { .. })
    }
}

/// Classify one raw line of upstream text.
///
/// Total function: every input maps to a [`ClassifiedLine`], malformed
/// lines degrade to `Other` rather than failing.
pub fn classify(raw_line: &str) -> ClassifiedLine {
    let line = raw_line.trim();

    if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
        return ClassifiedLine::Skip {
            text: line.to_string(),
        };
    }

    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() >= 2 {
        // TYPE,VALUE[,...] form. The value is taken as-is; an IP-ASN line
        // carries an AS number here, not a CIDR.
        match RuleType::parse(parts[0].trim()) {
            Some(rule_type) => {
                return ClassifiedLine::Rule {
                    text: line.to_string(),
                    rule_type,
                    cidr: parts[1].trim().to_string(),
                };
            }
            None => {
                return ClassifiedLine::Other {
                    text: line.to_string(),
                };
            }
        }
    }

    // Bare CIDR form.
    if is_ipv4_cidr(line) {
        return ClassifiedLine::Rule {
            text: line.to_string(),
            rule_type: RuleType::IpCidr,
            cidr: line.to_string(),
        };
    }
    if is_ipv6_cidr(line) {
        return ClassifiedLine::Rule {
            text: line.to_string(),
            rule_type: RuleType::IpCidr6,
            cidr: line.to_string(),
        };
    }

    ClassifiedLine::Other {
        text: line.to_string(),
    }
}
