//! Structured CIDR provider document builder.
//!
//! Collects the literal CIDR strings out of a classified rule list and
//! renders them as a small YAML-like provider document with separate
//! IPv4 and IPv6 sets.

use crate::classify::{classify, is_ipv4_cidr, is_ipv6_cidr, ClassifiedLine};
use crate::RuleType;

/// Accumulated CIDR sets for one rule source.
///
/// Entries keep first-seen order and upstream duplicates are preserved;
/// the document mirrors the source list, it does not normalize it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CidrSets {
    /// IPv4 CIDRs in source order
    pub v4: Vec<String>,
    /// IPv6 CIDRs in source order
    pub v6: Vec<String>,
}

impl CidrSets {
    /// Create an empty set pair.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one classified line, if it carries a usable CIDR.
    ///
    /// Values are re-validated here independently of the classifier's
    /// type tag: the loose `TYPE,VALUE` branch accepts IP-ASN and GEOIP
    /// lines and never inspects the value, but only literal CIDRs may
    /// enter the provider document. IPv6 values keep the permissive
    /// prefix-only check.
    pub fn add(&mut self, classified: &ClassifiedLine) {
        if let ClassifiedLine::Rule {
            rule_type, cidr, ..
        } = classified
        {
            match rule_type {
                RuleType::IpCidr if is_ipv4_cidr(cidr) => self.v4.push(cidr.clone()),
                RuleType::IpCidr6 if is_ipv6_cidr(cidr) => self.v6.push(cidr.clone()),
                _ => {}
            }
        }
    }

    /// Collect the CIDR sets for a whole source text.
    pub fn collect(source_text: &str) -> Self {
        let mut sets = Self::new();
        for line in source_text.lines() {
            sets.add(&classify(line));
        }
        sets
    }

    /// Whether both sets are empty.
    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }

    /// Total number of collected CIDRs.
    pub fn len(&self) -> usize {
        self.v4.len() + self.v6.len()
    }

    /// Render the provider document.
    ///
    /// Key order is fixed: `no_resolve`, then `ip_cidr_set`, then
    /// `ip_cidr6_set`. A set block is omitted entirely when empty, and
    /// the document always ends with a trailing newline.
    pub fn render(&self) -> String {
        let mut output = String::from("no_resolve: true\n");

        if !self.v4.is_empty() {
            output.push_str("ip_cidr_set:\n");
            for cidr in &self.v4 {
                output.push_str("  - ");
                output.push_str(cidr);
                output.push('\n');
            }
        }

        if !self.v6.is_empty() {
            output.push_str("ip_cidr6_set:\n");
            for cidr in &self.v6 {
                output.push_str("  - ");
                output.push_str(cidr);
                output.push('\n');
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_buckets_by_family() {
        let text = "1.2.3.4/24\n2001:db8::/32\nIP-CIDR,10.0.0.0/8\nIP-CIDR6,fc00::/7,no-resolve\n";
        let sets = CidrSets::collect(text);

        assert_eq!(sets.v4, vec!["1.2.3.4/24", "10.0.0.0/8"]);
        assert_eq!(sets.v6, vec!["2001:db8::/32", "fc00::/7"]);
        assert_eq!(sets.len(), 4);
    }

    #[test]
    fn test_collect_excludes_non_cidr_rules() {
        let text = "IP-ASN,4134\nGEOIP,CN,no-resolve\nDOMAIN-SUFFIX,example.com\n# comment\n";
        let sets = CidrSets::collect(text);
        assert!(sets.is_empty());
    }

    #[test]
    fn test_collect_revalidates_loose_values() {
        // Classified as rules via the TYPE,VALUE branch, but the values
        // fail the strict check and must not reach the document.
        let text = "IP-CIDR,300.0.0.1/8\nIP-CIDR,1.2.3.4/33\nIP-CIDR,not-a-cidr\nIP-CIDR6,zz::/64\n";
        let sets = CidrSets::collect(text);
        assert!(sets.is_empty());
    }

    #[test]
    fn test_collect_rejects_family_mismatch() {
        // An IPv6 value under an IP-CIDR tag fails the strict IPv4 check.
        let sets = CidrSets::collect("IP-CIDR,2001:db8::/32\nIP-CIDR6,1.2.3.4/24\n");
        assert!(sets.v4.is_empty());
        // 1.2.3.4/24 is not hex-and-colons, so the permissive check rejects it too.
        assert!(sets.v6.is_empty());
    }

    #[test]
    fn test_collect_preserves_duplicates_and_order() {
        let text = "10.0.0.0/8\n1.2.3.4/24\n10.0.0.0/8\n";
        let sets = CidrSets::collect(text);
        assert_eq!(sets.v4, vec!["10.0.0.0/8", "1.2.3.4/24", "10.0.0.0/8"]);
    }

    #[test]
    fn test_render_full_document() {
        let sets = CidrSets {
            v4: vec!["1.2.3.4/24".to_string(), "10.0.0.0/8".to_string()],
            v6: vec!["2001:db8::/32".to_string()],
        };
        assert_eq!(
            sets.render(),
            "no_resolve: true\nip_cidr_set:\n  - 1.2.3.4/24\n  - 10.0.0.0/8\nip_cidr6_set:\n  - 2001:db8::/32\n"
        );
    }

    #[test]
    fn test_render_omits_empty_blocks() {
        let empty = CidrSets::new();
        assert_eq!(empty.render(), "no_resolve: true\n");

        let v4_only = CidrSets {
            v4: vec!["10.0.0.0/8".to_string()],
            v6: Vec::new(),
        };
        assert_eq!(v4_only.render(), "no_resolve: true\nip_cidr_set:\n  - 10.0.0.0/8\n");

        let v6_only = CidrSets {
            v4: Vec::new(),
            v6: vec!["fc00::/7".to_string()],
        };
        assert_eq!(v6_only.render(), "no_resolve: true\nip_cidr6_set:\n  - fc00::/7\n");
    }
}
