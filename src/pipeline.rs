//! Per-source fetch/transform/write pipeline with parallel fan-out.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;

use crate::converter::{render_list, CidrSets};
use crate::fetch::{build_client, fetch_text};
use crate::source::RuleSource;
use crate::{Error, Result};

/// Both rendered documents for one rule source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// Annotated flat list (`<name>.txt`)
    pub list: String,
    /// CIDR provider document (`<name>.yaml`)
    pub provider: String,
}

/// Transform one source's complete text into both output documents.
///
/// Pure: no IO, the caller supplies the full upstream text and decides
/// where the documents go.
pub fn transform(source_text: &str) -> TransformOutput {
    TransformOutput {
        list: render_list(source_text),
        provider: CidrSets::collect(source_text).render(),
    }
}

/// Write both documents for a source under the output directory.
///
/// Each file goes through a temp file, sync, and rename so readers never
/// observe a partially written document.
pub fn write_outputs(output_dir: &Path, name: &str, output: &TransformOutput) -> Result<()> {
    write_atomic(&output_dir.join(format!("{}.txt", name)), &output.list)?;
    write_atomic(&output_dir.join(format!("{}.yaml", name)), &output.provider)?;
    Ok(())
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let mut temp_os = path.as_os_str().to_owned();
    temp_os.push(".tmp");
    let temp_path = PathBuf::from(temp_os);

    let mut temp_file = fs::File::create(&temp_path)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.sync_all()?;
    drop(temp_file);

    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Outcome of one run over all sources.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Names of sources whose outputs were written
    pub succeeded: Vec<String>,
    /// Failed sources with the error that stopped each one
    pub failed: Vec<(String, Error)>,
}

impl RunReport {
    /// Whether every source completed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run the full pipeline for every source, in parallel.
///
/// Sources are independent, so each one gets its own thread for the
/// fetch/transform/write sequence. A failure stops only its own source;
/// siblings run to completion and all failures are collected into the
/// report after the join.
pub fn run(sources: &[RuleSource], output_dir: &Path) -> Result<RunReport> {
    fs::create_dir_all(output_dir)?;
    let client = build_client()?;
    let output_dir: PathBuf = output_dir.to_path_buf();

    let mut report = RunReport::default();

    thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| {
                let client = &client;
                let output_dir = &output_dir;
                scope.spawn(move || process_source(client, output_dir, source))
            })
            .collect();

        for (source, handle) in sources.iter().zip(handles) {
            match handle.join() {
                Ok(Ok(())) => {
                    report.succeeded.push(source.name.clone());
                }
                Ok(Err(e)) => {
                    log::warn!("source '{}' failed: {}", source.name, e);
                    report.failed.push((source.name.clone(), e));
                }
                Err(_) => {
                    log::warn!("source '{}' panicked", source.name);
                    report.failed.push((
                        source.name.clone(),
                        Error::Config(format!("worker for '{}' panicked", source.name)),
                    ));
                }
            }
        }
    });

    Ok(report)
}

fn process_source(
    client: &reqwest::blocking::Client,
    output_dir: &Path,
    source: &RuleSource,
) -> Result<()> {
    log::info!("fetching {}: {}", source.name, source.url);
    let text = fetch_text(client, &source.url)?;

    let output = transform(&text);
    log::info!(
        "{}: {} lines in, {} bytes list, {} bytes provider",
        source.name,
        text.lines().count(),
        output.list.len(),
        output.provider.len()
    );

    write_outputs(output_dir, &source.name, &output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_mixed_source() {
        let text = "# telegram\n91.108.4.0/22\n2001:b28:f23d::/48\nIP-ASN,62041\nDOMAIN-SUFFIX,t.me\n";
        let output = transform(text);

        assert_eq!(
            output.list,
            "# telegram\nIP-CIDR,91.108.4.0/22,no-resolve\nIP-CIDR6,2001:b28:f23d::/48,no-resolve\nIP-ASN,62041,no-resolve\nDOMAIN-SUFFIX,t.me\n"
        );
        assert_eq!(
            output.provider,
            "no_resolve: true\nip_cidr_set:\n  - 91.108.4.0/22\nip_cidr6_set:\n  - 2001:b28:f23d::/48\n"
        );
    }

    #[test]
    fn test_transform_empty_source() {
        let output = transform("");
        assert_eq!(output.list, "\n");
        assert_eq!(output.provider, "no_resolve: true\n");
    }

    #[test]
    fn test_transform_is_stable_over_own_output() {
        let text = "91.108.4.0/22\nIP-CIDR,10.0.0.0/8\nDOMAIN,t.me\n";
        let once = transform(text);
        let twice = transform(&once.list);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_write_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let output = transform("1.2.3.4/24\n");

        write_outputs(dir.path(), "test", &output).unwrap();

        let list = fs::read_to_string(dir.path().join("test.txt")).unwrap();
        let provider = fs::read_to_string(dir.path().join("test.yaml")).unwrap();
        assert_eq!(list, "IP-CIDR,1.2.3.4/24,no-resolve\n");
        assert_eq!(provider, "no_resolve: true\nip_cidr_set:\n  - 1.2.3.4/24\n");

        // No temp files left behind
        assert!(!dir.path().join("test.txt.tmp").exists());
        assert!(!dir.path().join("test.yaml.tmp").exists());
    }
}
