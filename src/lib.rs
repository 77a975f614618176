//! ruledist - fetches remote routing rule lists and rewrites them.
//!
//! Each configured source is a plaintext rule list (CIDR/ASN/GEOIP entries
//! for traffic-routing clients). For every source the pipeline produces two
//! output dialects:
//!
//! - **Annotated list** (`<name>.txt`): the upstream list with a
//!   `no-resolve` marker applied to every IP-based rule, idempotently.
//! - **Provider document** (`<name>.yaml`): raw IPv4/IPv6 CIDRs bucketed
//!   into named sets, in a small YAML-like format.
//!
//! The core is pure line classification and transformation; fetching and
//! file writing are thin collaborators around it.
//!
//! # Quick Start
//!
//! ```ignore
//! use ruledist::{pipeline, source};
//! use std::path::Path;
//!
//! let report = pipeline::run(&source::default_sources(), Path::new("dist"))?;
//! for (name, err) in &report.failed {
//!     eprintln!("{}: {}", name, err);
//! }
//! ```
//!
//! # Line handling
//!
//! - Blank lines and `#`/`//` comments pass through verbatim.
//! - `TYPE,VALUE[,...]` lines with a recognized IP rule type (`IP-CIDR`,
//!   `IP-CIDR6`, `IP-ASN`, `GEOIP`) are annotated; the value is not
//!   re-parsed at this stage.
//! - Bare IPv4/IPv6 CIDR lines are rewritten into the full
//!   `TYPE,CIDR,no-resolve` form.
//! - Everything else (domain rules, malformed CIDRs) passes through
//!   unchanged and is excluded from the provider document.

mod error;
mod rule_type;

pub mod classify;
pub mod converter;
pub mod fetch;
pub mod pipeline;
pub mod source;

// Re-export core types
pub use classify::{classify, ClassifiedLine};
pub use converter::{annotate, render_list, CidrSets};
pub use error::{Error, Result};
pub use pipeline::{transform, RunReport, TransformOutput};
pub use rule_type::RuleType;
pub use source::RuleSource;
