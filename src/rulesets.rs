//! Fetching and parsing of the reference-files rulesets.
//!
//! The archive publishes seven JSON documents describing how each PUID is
//! handled during conversion: automated conversion, extraction, Symphony
//! conversion, re-identification, custom signatures, manual conversion, and
//! an ignore list. Each document carries an optional `version` stamp and a
//! `data` payload keyed by PUID (`custom_signatures` uses an array of
//! objects instead, each with a `puid` field).
//!
//! Documents are fetched from the configured source, which is either a
//! remote base URL or a local directory. Any malformed document aborts
//! loading: classifying against a partially built catalog would silently
//! misreport formats as unhandled.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::config::Config;

/// Document names in merge order. The ignore list is last; it never joins
/// the handled union.
pub const RULESET_NAMES: [&str; 7] = [
    "to_convert",
    "to_extract",
    "to_convert_symphovert",
    "to_reidentify",
    "custom_signatures",
    "manual_convert",
    "to_ignore",
];

/// Wire shape of a reference-files document.
#[derive(Debug, Deserialize)]
struct RulesetDoc {
    #[serde(default)]
    version: Option<String>,
    data: Option<serde_json::Value>,
}

/// A parsed ruleset: its version stamp and the set of PUIDs it covers.
#[derive(Debug, Clone)]
pub struct Ruleset {
    pub version: Option<String>,
    pub puids: HashSet<String>,
}

/// All seven rulesets, fully parsed. No partially built bundle ever leaves
/// this module.
#[derive(Debug, Clone)]
pub struct RulesetBundle {
    pub to_convert: Ruleset,
    pub to_extract: Ruleset,
    pub to_convert_symphovert: Ruleset,
    pub to_reidentify: Ruleset,
    pub custom_signatures: Ruleset,
    pub manual_convert: Ruleset,
    pub to_ignore: Ruleset,
}

impl RulesetBundle {
    /// `(name, version)` pairs in the fixed document order, for the report
    /// header and the `rulesets` listing.
    pub fn versions(&self) -> Vec<(&'static str, Option<String>)> {
        self.iter()
            .map(|(name, rs)| (name, rs.version.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Ruleset)> {
        [
            ("to_convert", &self.to_convert),
            ("to_extract", &self.to_extract),
            ("to_convert_symphovert", &self.to_convert_symphovert),
            ("to_reidentify", &self.to_reidentify),
            ("custom_signatures", &self.custom_signatures),
            ("manual_convert", &self.manual_convert),
            ("to_ignore", &self.to_ignore),
        ]
        .into_iter()
    }
}

/// Parse one document. `name` selects the payload shape and is included in
/// every error message so a broken document is identifiable from the CLI.
pub fn parse_ruleset(name: &str, text: &str) -> Result<Ruleset> {
    let doc: RulesetDoc = serde_json::from_str(text)
        .with_context(|| format!("Malformed ruleset document '{}'", name))?;

    let data = match doc.data {
        Some(data) => data,
        None => bail!("Ruleset document '{}' is missing the 'data' field", name),
    };

    let puids = if name == "custom_signatures" {
        // data: [{ "puid": "...", ... }, ...]
        let entries = data.as_array().with_context(|| {
            format!("Ruleset document '{}' must carry an array in 'data'", name)
        })?;
        entries
            .iter()
            .map(|entry| {
                entry
                    .get("puid")
                    .and_then(|p| p.as_str())
                    .map(|p| p.to_string())
                    .with_context(|| {
                        format!("Entry in ruleset '{}' is missing a 'puid' string", name)
                    })
            })
            .collect::<Result<HashSet<String>>>()?
    } else {
        // data: { "<puid>": ..., ... }
        let map = data.as_object().with_context(|| {
            format!("Ruleset document '{}' must carry an object in 'data'", name)
        })?;
        map.keys().cloned().collect()
    };

    Ok(Ruleset {
        version: doc.version,
        puids,
    })
}

/// Fetch and parse all seven documents from the configured source.
pub async fn load_rulesets(config: &Config) -> Result<RulesetBundle> {
    let client = if config.rulesets.is_remote() {
        Some(
            reqwest::Client::builder()
                .timeout(Duration::from_secs(config.rulesets.timeout_secs))
                .build()
                .context("Failed to build HTTP client")?,
        )
    } else {
        None
    };

    let client = client.as_ref();
    Ok(RulesetBundle {
        to_convert: load_one(config, client, "to_convert").await?,
        to_extract: load_one(config, client, "to_extract").await?,
        to_convert_symphovert: load_one(config, client, "to_convert_symphovert").await?,
        to_reidentify: load_one(config, client, "to_reidentify").await?,
        custom_signatures: load_one(config, client, "custom_signatures").await?,
        manual_convert: load_one(config, client, "manual_convert").await?,
        to_ignore: load_one(config, client, "to_ignore").await?,
    })
}

async fn load_one(config: &Config, client: Option<&reqwest::Client>, name: &str) -> Result<Ruleset> {
    let text = fetch_document(config, client, name).await?;
    parse_ruleset(name, &text)
}

async fn fetch_document(config: &Config, client: Option<&reqwest::Client>, name: &str) -> Result<String> {
    match client {
        Some(client) => {
            let url = format!("{}/{}.json", config.rulesets.source.trim_end_matches('/'), name);
            let response = client
                .get(&url)
                .send()
                .await
                .with_context(|| format!("Failed to fetch ruleset '{}' from {}", name, url))?;
            let response = response
                .error_for_status()
                .with_context(|| format!("Ruleset '{}' request was rejected", name))?;
            response
                .text()
                .await
                .with_context(|| format!("Failed to read ruleset '{}' response body", name))
        }
        None => {
            let path = Path::new(&config.rulesets.source).join(format!("{}.json", name));
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read ruleset file: {}", path.display()))
        }
    }
}

/// Run the `rulesets` command: load every document and print a health
/// listing with versions and entry counts.
pub async fn run_rulesets(config: &Config) -> Result<()> {
    let bundle = load_rulesets(config).await?;

    println!("Source: {}", config.rulesets.source);
    println!();
    println!("{:<24} {:<16} {:>7}", "RULESET", "VERSION", "ENTRIES");
    for (name, ruleset) in bundle.iter() {
        println!(
            "{:<24} {:<16} {:>7}",
            name,
            ruleset.version.as_deref().unwrap_or("unknown"),
            ruleset.puids.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_puid_keyed_document() {
        let text = r#"{"version": "1a2b3c", "data": {"fmt/1": {"converter": "libreoffice"}, "fmt/2": {}}}"#;
        let ruleset = parse_ruleset("to_convert", text).unwrap();
        assert_eq!(ruleset.version.as_deref(), Some("1a2b3c"));
        assert_eq!(ruleset.puids.len(), 2);
        assert!(ruleset.puids.contains("fmt/1"));
        assert!(ruleset.puids.contains("fmt/2"));
    }

    #[test]
    fn test_parse_custom_signatures_array() {
        let text = r#"{"version": "v2", "data": [{"puid": "fmt/100", "bof": "4D5A"}, {"puid": "fmt/200"}]}"#;
        let ruleset = parse_ruleset("custom_signatures", text).unwrap();
        assert!(ruleset.puids.contains("fmt/100"));
        assert!(ruleset.puids.contains("fmt/200"));
    }

    #[test]
    fn test_version_is_optional() {
        let ruleset = parse_ruleset("to_ignore", r#"{"data": {"fmt/3": {}}}"#).unwrap();
        assert!(ruleset.version.is_none());
        assert!(ruleset.puids.contains("fmt/3"));
    }

    #[test]
    fn test_missing_data_is_an_error() {
        let err = parse_ruleset("to_extract", r#"{"version": "v1"}"#).unwrap_err();
        assert!(err.to_string().contains("to_extract"));
    }

    #[test]
    fn test_wrong_data_shape_is_an_error() {
        assert!(parse_ruleset("to_convert", r#"{"data": [1, 2, 3]}"#).is_err());
        assert!(parse_ruleset("custom_signatures", r#"{"data": {"fmt/1": {}}}"#).is_err());
    }

    #[test]
    fn test_custom_signature_entry_without_puid_is_an_error() {
        let text = r#"{"data": [{"bof": "4D5A"}]}"#;
        assert!(parse_ruleset("custom_signatures", text).is_err());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(parse_ruleset("to_convert", "not json at all").is_err());
    }
}
