//! The merged reference catalog.
//!
//! Collapses the seven rulesets into one immutable classifier. The handled
//! union deliberately covers only the fully automated mechanisms
//! (conversion, re-identification, custom signatures); formats marked for
//! manual conversion, extraction, or Symphony stay in their own sets so the
//! report can itemize them instead of absorbing them into a single total.

use std::collections::HashSet;

use crate::rulesets::RulesetBundle;

/// Precedence-ordered PUID classifier built once per run.
#[derive(Debug, Clone)]
pub struct ReferenceCatalog {
    handled: HashSet<String>,
    ignored: HashSet<String>,
    manual: HashSet<String>,
    extract: HashSet<String>,
    symphovert: HashSet<String>,
    versions: Vec<(&'static str, Option<String>)>,
}

impl ReferenceCatalog {
    /// Build the catalog from a fully parsed bundle.
    ///
    /// Shape errors are impossible here: a [`RulesetBundle`] only exists
    /// once every document parsed. The handled union is merged from an
    /// explicit ordered list so merge order is visible, not an accident of
    /// statement order.
    pub fn from_bundle(bundle: &RulesetBundle) -> Self {
        let automated = [
            &bundle.to_convert,
            &bundle.to_reidentify,
            &bundle.custom_signatures,
        ];

        let mut handled = HashSet::new();
        for ruleset in automated {
            handled.extend(ruleset.puids.iter().cloned());
        }

        Self {
            handled,
            ignored: bundle.to_ignore.puids.clone(),
            manual: bundle.manual_convert.puids.clone(),
            extract: bundle.to_extract.puids.clone(),
            symphovert: bundle.to_convert_symphovert.puids.clone(),
            versions: bundle.versions(),
        }
    }

    pub fn is_handled(&self, puid: &str) -> bool {
        self.handled.contains(puid)
    }

    pub fn is_ignored(&self, puid: &str) -> bool {
        self.ignored.contains(puid)
    }

    pub fn is_manual(&self, puid: &str) -> bool {
        self.manual.contains(puid)
    }

    pub fn is_extract(&self, puid: &str) -> bool {
        self.extract.contains(puid)
    }

    pub fn is_symphovert(&self, puid: &str) -> bool {
        self.symphovert.contains(puid)
    }

    /// Ruleset version stamps in document order, for the report header.
    pub fn versions(&self) -> &[(&'static str, Option<String>)] {
        &self.versions
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::rulesets::Ruleset;

    fn ruleset(puids: &[&str]) -> Ruleset {
        Ruleset {
            version: None,
            puids: puids.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Bundle builder shared with the classify tests.
    pub(crate) fn bundle(
        convert: &[&str],
        extract: &[&str],
        symphovert: &[&str],
        manual: &[&str],
        ignore: &[&str],
    ) -> RulesetBundle {
        RulesetBundle {
            to_convert: ruleset(convert),
            to_extract: ruleset(extract),
            to_convert_symphovert: ruleset(symphovert),
            to_reidentify: ruleset(&[]),
            custom_signatures: ruleset(&[]),
            manual_convert: ruleset(manual),
            to_ignore: ruleset(ignore),
        }
    }

    #[test]
    fn test_handled_union_covers_automated_sources() {
        let mut b = bundle(&["fmt/1"], &[], &[], &[], &[]);
        b.to_reidentify = ruleset(&["fmt/2"]);
        b.custom_signatures = ruleset(&["fmt/3"]);

        let catalog = ReferenceCatalog::from_bundle(&b);
        assert!(catalog.is_handled("fmt/1"));
        assert!(catalog.is_handled("fmt/2"));
        assert!(catalog.is_handled("fmt/3"));
        assert!(!catalog.is_handled("fmt/4"));
    }

    #[test]
    fn test_itemized_sets_stay_out_of_handled() {
        let catalog = ReferenceCatalog::from_bundle(&bundle(
            &[],
            &["fmt/10"],
            &["fmt/11"],
            &["fmt/12"],
            &[],
        ));
        assert!(!catalog.is_handled("fmt/10"));
        assert!(!catalog.is_handled("fmt/11"));
        assert!(!catalog.is_handled("fmt/12"));
        assert!(catalog.is_extract("fmt/10"));
        assert!(catalog.is_symphovert("fmt/11"));
        assert!(catalog.is_manual("fmt/12"));
    }

    #[test]
    fn test_versions_keep_document_order() {
        let mut b = bundle(&[], &[], &[], &[], &[]);
        b.to_convert.version = Some("abc".to_string());
        b.to_ignore.version = Some("xyz".to_string());

        let catalog = ReferenceCatalog::from_bundle(&b);
        let names: Vec<&str> = catalog.versions().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec![
                "to_convert",
                "to_extract",
                "to_convert_symphovert",
                "to_reidentify",
                "custom_signatures",
                "manual_convert",
                "to_ignore"
            ]
        );
        assert_eq!(catalog.versions()[0].1.as_deref(), Some("abc"));
        assert_eq!(catalog.versions()[6].1.as_deref(), Some("xyz"));
    }
}
