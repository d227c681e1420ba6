//! Common types for package records and their raw inputs

use std::fmt;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::package::error::PackageError;

/// A `major` with an optional `minor`, as parsed from a version directory name.
/// A missing minor matches any minor of that major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct TypingVersion {
    pub major: u64,
    #[serde(default)]
    pub minor: Option<u64>,
}

impl TypingVersion {
    pub fn new(major: u64, minor: Option<u64>) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for TypingVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minor {
            Some(minor) => write!(f, "{}.{}", self.major, minor),
            None => write!(f, "{}", self.major),
        }
    }
}

/// Version requirement on a dependency edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyVersion {
    /// `*`: always resolves to the latest version
    Any,
    Version(TypingVersion),
}

impl DependencyVersion {
    pub fn major(major: u64) -> Self {
        DependencyVersion::Version(TypingVersion::new(major, None))
    }

    pub fn major_minor(major: u64, minor: u64) -> Self {
        DependencyVersion::Version(TypingVersion::new(major, Some(minor)))
    }
}

impl fmt::Display for DependencyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyVersion::Any => f.write_str("*"),
            DependencyVersion::Version(version) => write!(f, "{version}"),
        }
    }
}

impl From<TypingVersion> for DependencyVersion {
    fn from(version: TypingVersion) -> Self {
        DependencyVersion::Version(version)
    }
}

impl<'de> Deserialize<'de> for DependencyVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Wildcard(String),
            Version(TypingVersion),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Wildcard(s) if s == "*" => Ok(DependencyVersion::Any),
            Raw::Wildcard(s) => Err(D::Error::custom(format!(
                "expected \"*\" or {{ major, minor? }}, found \"{s}\""
            ))),
            Raw::Version(version) => Ok(DependencyVersion::Version(version)),
        }
    }
}

/// Version range as written in a generated package.json: `*` or `^<major>[.<minor>]`
pub fn format_dependency_version(version: &DependencyVersion) -> String {
    match version {
        DependencyVersion::Any => "*".to_string(),
        DependencyVersion::Version(v) => format!("^{v}"),
    }
}

/// Unresolved reference to a dependency edge
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageId {
    pub name: String,
    pub version: DependencyVersion,
}

impl PackageId {
    pub fn new(name: impl Into<String>, version: DependencyVersion) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// Reference to whatever version is latest
    pub fn latest(name: impl Into<String>) -> Self {
        Self::new(name, DependencyVersion::Any)
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Fully resolved `major.minor` of a concrete record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeaderVersion {
    pub major: u64,
    pub minor: u64,
}

/// Id of a concrete record; both major and minor are known
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageIdWithDefiniteVersion {
    pub name: String,
    pub version: HeaderVersion,
}

impl From<PackageIdWithDefiniteVersion> for PackageId {
    fn from(id: PackageIdWithDefiniteVersion) -> Self {
        PackageId::new(
            id.name,
            DependencyVersion::major_minor(id.version.major, id.version.minor),
        )
    }
}

/// Licenses a typings package may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum License {
    #[default]
    #[serde(rename = "MIT")]
    Mit,
    #[serde(rename = "Apache-2.0")]
    Apache20,
}

impl License {
    pub fn as_str(&self) -> &'static str {
        match self {
            License::Mit => "MIT",
            License::Apache20 => "Apache-2.0",
        }
    }

    /// Interpret the `license` field of a package.json.
    ///
    /// Absence means MIT. Writing "MIT" explicitly is rejected as redundant.
    pub fn from_package_json(license: Option<&str>) -> Result<License, PackageError> {
        match license {
            None => Ok(License::Mit),
            Some("MIT") => Err(PackageError::RedundantLicense),
            Some("Apache-2.0") => Ok(License::Apache20),
            Some(other) => Err(PackageError::InvalidLicense(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub github_username: Option<String>,
}

/// One version of an actively maintained package, as stored in the data file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingsDataRaw {
    /// Package name in registry key form (e.g. "babel__core")
    pub typings_package_name: String,
    /// Display name of the library the typings describe
    pub library_name: String,
    /// Set when this version lives in a `v<X>` subdirectory of the package
    #[serde(default)]
    pub library_version_directory_name: Option<String>,
    #[serde(default)]
    pub dependencies: IndexMap<String, DependencyVersion>,
    #[serde(default)]
    pub test_dependencies: Vec<String>,
    #[serde(default)]
    pub path_mappings: IndexMap<String, TypingVersion>,
    #[serde(default)]
    pub contributors: Vec<Contributor>,
    #[serde(default = "default_min_ts_version")]
    pub min_ts_version: String,
    #[serde(default)]
    pub types_versions: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub license: License,
    #[serde(default)]
    pub content_hash: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub globals: Vec<String>,
    #[serde(default)]
    pub declared_modules: Vec<String>,
}

fn default_min_ts_version() -> String {
    crate::config::LOWEST_TYPESCRIPT_VERSION.to_string()
}

/// Every version of one logical package, keyed by `"<major>.<minor>"`
pub type TypingsVersionsRaw = IndexMap<String, TypingsDataRaw>;

/// Input A: logical package name -> versions
pub type AllTypesDataRaw = IndexMap<String, TypingsVersionsRaw>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("*"), DependencyVersion::Any)]
    #[case(json!({ "major": 2 }), DependencyVersion::major(2))]
    #[case(json!({ "major": 2, "minor": 1 }), DependencyVersion::major_minor(2, 1))]
    #[case(json!({ "major": 3, "minor": null }), DependencyVersion::major(3))]
    fn dependency_version_deserializes(
        #[case] value: serde_json::Value,
        #[case] expected: DependencyVersion,
    ) {
        assert_eq!(
            serde_json::from_value::<DependencyVersion>(value).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case(json!("latest"))]
    #[case(json!({ "minor": 1 }))]
    #[case(json!(3))]
    fn dependency_version_rejects_other_values(#[case] value: serde_json::Value) {
        assert!(serde_json::from_value::<DependencyVersion>(value).is_err());
    }

    #[rstest]
    #[case(DependencyVersion::Any, "*")]
    #[case(DependencyVersion::major(4), "^4")]
    #[case(DependencyVersion::major_minor(4, 2), "^4.2")]
    fn format_dependency_version_returns_expected(
        #[case] version: DependencyVersion,
        #[case] expected: &str,
    ) {
        assert_eq!(format_dependency_version(&version), expected);
    }

    #[rstest]
    #[case(None, Some(License::Mit))]
    #[case(Some("Apache-2.0"), Some(License::Apache20))]
    #[case(Some("MIT"), None)] // redundant
    #[case(Some("GPL-3.0"), None)]
    fn license_from_package_json(#[case] license: Option<&str>, #[case] expected: Option<License>) {
        assert_eq!(License::from_package_json(license).ok(), expected);
    }

    #[test]
    fn redundant_mit_license_is_reported_as_such() {
        let err = License::from_package_json(Some("MIT")).unwrap_err();

        assert!(matches!(err, PackageError::RedundantLicense));
    }

    #[test]
    fn typings_data_raw_fills_defaults() {
        let raw = serde_json::from_value::<TypingsDataRaw>(json!({
            "typingsPackageName": "widget",
            "libraryName": "Widget"
        }))
        .unwrap();

        assert_eq!(raw.license, License::Mit);
        assert_eq!(raw.min_ts_version, crate::config::LOWEST_TYPESCRIPT_VERSION);
        assert!(raw.dependencies.is_empty());
        assert!(raw.library_version_directory_name.is_none());
    }

    #[test]
    fn typings_data_raw_keeps_dependency_order() {
        let raw = serde_json::from_str::<TypingsDataRaw>(
            r#"{
                "typingsPackageName": "widget",
                "libraryName": "Widget",
                "dependencies": { "zeta": "*", "alpha": { "major": 1 } },
                "license": "Apache-2.0"
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = raw.dependencies.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(raw.license, License::Apache20);
    }

    #[test]
    fn package_id_display() {
        assert_eq!(PackageId::latest("node").to_string(), "node@*");
        assert_eq!(
            PackageId::new("node", DependencyVersion::major_minor(16, 3)).to_string(),
            "node@16.3"
        );
    }
}
