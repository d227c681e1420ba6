//! Every known version of one logical package

use std::collections::HashSet;

use tracing::debug;

use crate::package::error::PackageError;
use crate::package::semver::parse_version_key;
use crate::package::traits::Package;
use crate::package::types::{DependencyVersion, TypingVersion, TypingsVersionsRaw};
use crate::package::typings::TypingsData;

/// Versions of one package, ordered newest to oldest.
///
/// The first record is the only one flagged latest.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingsVersions {
    name: String,
    versions: Vec<TypingsData>,
}

impl TypingsVersions {
    /// Build from a map of `"<major>.<minor>"` keys to raw records
    pub fn new(name: &str, data: TypingsVersionsRaw) -> Result<Self, PackageError> {
        let mut parsed = data
            .into_iter()
            .map(|(key, raw)| match parse_version_key(&key) {
                Some(version) => Ok((version, key, raw)),
                None => Err(PackageError::InvalidVersionKey {
                    name: name.to_string(),
                    key,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        parsed.sort_by(|(a, _, _), (b, _, _)| b.cmp(a));

        // "1" and "1.0" name the same version
        if let Some(pair) = parsed.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(PackageError::InvalidVersionKey {
                name: name.to_string(),
                key: pair[1].1.clone(),
            });
        }

        let versions: Vec<TypingsData> = parsed
            .into_iter()
            .enumerate()
            .map(|(index, (version, _, raw))| TypingsData::new(raw, &version, index == 0))
            .collect();

        debug!("Loaded {} version(s) of {}", versions.len(), name);

        Ok(Self {
            name: name.to_string(),
            versions,
        })
    }

    /// Registry key of the package these versions belong to
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All records, newest first
    pub fn get_all(&self) -> impl Iterator<Item = &TypingsData> {
        self.versions.iter()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn try_get_latest(&self) -> Option<&TypingsData> {
        self.versions.first()
    }

    pub fn get_latest(&self) -> Result<&TypingsData, PackageError> {
        self.try_get_latest()
            .ok_or_else(|| PackageError::EmptyVersionSet(self.name.clone()))
    }

    /// Resolve a version requirement.
    ///
    /// `context` is appended to the error when nothing matches.
    pub fn get(
        &self,
        version: &DependencyVersion,
        context: Option<&str>,
    ) -> Result<&TypingsData, PackageError> {
        match version {
            DependencyVersion::Any => self.get_latest(),
            DependencyVersion::Version(requested) => self
                .try_get_latest_match(requested)
                .ok_or_else(|| PackageError::UnmatchedVersion {
                    name: self.name.clone(),
                    version: format!(
                        "{}.{}",
                        requested.major,
                        requested
                            .minor
                            .map_or_else(|| "*".to_string(), |m| m.to_string())
                    ),
                    context: context.map(str::to_string),
                }),
        }
    }

    pub fn try_get(&self, version: &DependencyVersion) -> Option<&TypingsData> {
        match version {
            DependencyVersion::Any => self.try_get_latest(),
            DependencyVersion::Version(requested) => self.try_get_latest_match(requested),
        }
    }

    /// Whether two or more records share the same minor version number
    pub fn has_separate_minor_versions(&self) -> bool {
        let minors: HashSet<u64> = self.versions.iter().map(|v| v.minor()).collect();
        minors.len() != self.versions.len()
    }

    /// First record (newest first) with the requested major and either the
    /// requested minor or, when none was given, any minor.
    fn try_get_latest_match(&self, requested: &TypingVersion) -> Option<&TypingsData> {
        self.versions.iter().find(|data| {
            data.major() == requested.major
                && requested.minor.is_none_or(|minor| data.minor() == minor)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn widget() -> TypingsVersions {
        let raw: TypingsVersionsRaw = serde_json::from_value(json!({
            "1.0": { "typingsPackageName": "widget", "libraryName": "A" },
            "2.3": { "typingsPackageName": "widget", "libraryName": "B" },
            "2.1": { "typingsPackageName": "widget", "libraryName": "C" }
        }))
        .unwrap();
        TypingsVersions::new("widget", raw).unwrap()
    }

    fn labels<'a>(versions: impl Iterator<Item = &'a TypingsData>) -> Vec<&'a str> {
        versions.map(|v| v.library_name()).collect()
    }

    #[test]
    fn versions_are_sorted_newest_first() {
        let versions = widget();

        assert_eq!(labels(versions.get_all()), vec!["B", "C", "A"]);
    }

    #[test]
    fn only_first_record_is_latest() {
        let versions = widget();

        let latest: Vec<bool> = versions.get_all().map(|v| v.is_latest()).collect();
        assert_eq!(latest, vec![true, false, false]);
        assert_eq!(versions.get_latest().unwrap().library_name(), "B");
    }

    #[rstest]
    #[case(DependencyVersion::Any, "B")]
    #[case(DependencyVersion::major(2), "B")]
    #[case(DependencyVersion::major_minor(2, 1), "C")]
    #[case(DependencyVersion::major_minor(2, 3), "B")]
    #[case(DependencyVersion::major(1), "A")]
    #[case(DependencyVersion::major_minor(1, 0), "A")]
    fn get_returns_expected_record(#[case] version: DependencyVersion, #[case] expected: &str) {
        let versions = widget();

        assert_eq!(versions.get(&version, None).unwrap().library_name(), expected);
        assert_eq!(versions.try_get(&version).unwrap().library_name(), expected);
    }

    #[rstest]
    #[case(DependencyVersion::major(3))]
    #[case(DependencyVersion::major_minor(2, 2))]
    fn unmatched_version_fails_or_is_absent(#[case] version: DependencyVersion) {
        let versions = widget();

        assert!(versions.try_get(&version).is_none());
        assert!(matches!(
            versions.get(&version, None),
            Err(PackageError::UnmatchedVersion { .. })
        ));
    }

    #[test]
    fn unmatched_version_error_embeds_context() {
        let versions = widget();

        let err = versions
            .get(
                &DependencyVersion::major(5),
                Some("gadget has a path mapping for widget"),
            )
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Could not find version 5.* of 'widget'. gadget has a path mapping for widget"
        );
    }

    #[test]
    fn invalid_version_key_is_rejected() {
        let raw: TypingsVersionsRaw = serde_json::from_value(json!({
            "latest": { "typingsPackageName": "widget", "libraryName": "A" }
        }))
        .unwrap();

        assert!(matches!(
            TypingsVersions::new("widget", raw),
            Err(PackageError::InvalidVersionKey { key, .. }) if key == "latest"
        ));
    }

    #[test]
    fn equivalent_version_keys_are_rejected() {
        let raw: TypingsVersionsRaw = serde_json::from_value(json!({
            "1": { "typingsPackageName": "widget", "libraryName": "A" },
            "1.0": { "typingsPackageName": "widget", "libraryName": "B" }
        }))
        .unwrap();

        assert!(TypingsVersions::new("widget", raw).is_err());
    }

    #[test]
    fn empty_set_has_no_latest() {
        let versions = TypingsVersions::new("widget", TypingsVersionsRaw::new()).unwrap();

        assert!(versions.try_get_latest().is_none());
        assert!(versions.try_get(&DependencyVersion::Any).is_none());
        assert!(matches!(
            versions.get_latest(),
            Err(PackageError::EmptyVersionSet(name)) if name == "widget"
        ));
    }

    #[test]
    fn has_separate_minor_versions_when_a_minor_repeats() {
        let majors_only: TypingsVersionsRaw = serde_json::from_value(json!({
            "1.0": { "typingsPackageName": "a", "libraryName": "a" },
            "2.0": { "typingsPackageName": "a", "libraryName": "a" }
        }))
        .unwrap();
        let with_minors: TypingsVersionsRaw = serde_json::from_value(json!({
            "1.0": { "typingsPackageName": "b", "libraryName": "b" },
            "1.1": { "typingsPackageName": "b", "libraryName": "b" }
        }))
        .unwrap();

        assert!(
            TypingsVersions::new("a", majors_only)
                .unwrap()
                .has_separate_minor_versions()
        );
        assert!(
            !TypingsVersions::new("b", with_minors)
                .unwrap()
                .has_separate_minor_versions()
        );
    }
}
