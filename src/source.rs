//! Rule source definitions.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// One upstream rule list: a short name and the URL to fetch it from.
///
/// Sources are fixed at process start; the built-in list can be replaced
/// by a YAML file but never mutated during a run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleSource {
    /// Short identifier, used as the output file stem
    pub name: String,
    /// URL of the upstream plaintext rule list
    pub url: String,
}

impl RuleSource {
    /// Create a new rule source.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The built-in rule sources.
pub fn default_sources() -> Vec<RuleSource> {
    vec![
        RuleSource::new(
            "tgcidr",
            "https://raw.githubusercontent.com/Loyalsoldier/surge-rules/release/telegramcidr.txt",
        ),
        RuleSource::new(
            "cncidr",
            "https://raw.githubusercontent.com/Loyalsoldier/surge-rules/release/cncidr.txt",
        ),
    ]
}

/// Load rule sources from a YAML file.
///
/// The file is a sequence of `{ name, url }` mappings. An empty list or
/// duplicate names are configuration errors.
pub fn load_sources(path: impl AsRef<Path>) -> Result<Vec<RuleSource>> {
    let content = fs::read_to_string(path.as_ref())?;
    let sources: Vec<RuleSource> = serde_yaml::from_str(&content)?;

    if sources.is_empty() {
        return Err(Error::Config("source list is empty".to_string()));
    }

    for (i, source) in sources.iter().enumerate() {
        if source.name.is_empty() {
            return Err(Error::Config(format!("source #{} has an empty name", i)));
        }
        if source.url.is_empty() {
            return Err(Error::Config(format!(
                "source '{}' has an empty url",
                source.name
            )));
        }
        if sources[..i].iter().any(|s| s.name == source.name) {
            return Err(Error::Config(format!(
                "duplicate source name '{}'",
                source.name
            )));
        }
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_sources() {
        let sources = default_sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name, "tgcidr");
        assert_eq!(sources[1].name, "cncidr");
        assert!(sources.iter().all(|s| s.url.starts_with("https://")));
    }

    #[test]
    fn test_load_sources_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sources.yaml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "- name: tgcidr\n  url: https://example.com/telegramcidr.txt\n- name: cncidr\n  url: https://example.com/cncidr.txt"
        )
        .unwrap();

        let sources = load_sources(&path).unwrap();
        assert_eq!(
            sources,
            vec![
                RuleSource::new("tgcidr", "https://example.com/telegramcidr.txt"),
                RuleSource::new("cncidr", "https://example.com/cncidr.txt"),
            ]
        );
    }

    #[test]
    fn test_load_sources_rejects_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sources.yaml");
        fs::write(&path, "[]").unwrap();

        assert!(matches!(load_sources(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_sources_rejects_duplicate_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sources.yaml");
        fs::write(
            &path,
            "- name: a\n  url: https://example.com/1.txt\n- name: a\n  url: https://example.com/2.txt\n",
        )
        .unwrap();

        assert!(matches!(load_sources(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_sources_rejects_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sources.yaml");
        fs::write(&path, "not: [valid").unwrap();

        assert!(matches!(load_sources(&path), Err(Error::Yaml(_))));
    }
}
