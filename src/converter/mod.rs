//! Output format converters for rule lists.

mod list;
mod provider;

pub use list::{annotate, render_list};
pub use provider::CidrSets;
