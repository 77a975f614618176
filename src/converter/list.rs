//! No-resolve annotation for flat rule lists.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::{classify, ClassifiedLine};

static NO_RESOLVE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bno-resolve\b").unwrap());

/// Render an IP-based rule line with the `no-resolve` marker, idempotently.
///
/// Skip and other lines come back unchanged. A rule line that already
/// carries a whole-word `no-resolve` token (any case) also comes back
/// unchanged, so re-running the pipeline over its own output is a no-op.
pub fn annotate(classified: &ClassifiedLine) -> String {
    match classified {
        ClassifiedLine::Skip { text } | ClassifiedLine::Other { text } => text.clone(),
        ClassifiedLine::Rule {
            text,
            rule_type,
            cidr,
        } => {
            if NO_RESOLVE_PATTERN.is_match(text) {
                return text.clone();
            }
            if text.contains(',') {
                format!("{},no-resolve", text)
            } else {
                // Bare CIDR line: synthesize the full TYPE,VALUE form.
                format!("{},{},no-resolve", rule_type, cidr)
            }
        }
    }
}

/// Rewrite a whole upstream rule list into its annotated form.
///
/// Lines are classified and annotated one by one, rejoined with `\n`,
/// and the result always ends with exactly one trailing newline. An
/// empty source renders as a single newline.
pub fn render_list(source_text: &str) -> String {
    let annotated: Vec<String> = source_text
        .lines()
        .map(|line| annotate(&classify(line)))
        .collect();

    let mut output = annotated.join("\n");
    output.truncate(output.trim_end().len());
    output.push('\n');
    output
}
