//! One version of an actively maintained typings package

use indexmap::IndexMap;
use semver::Version;

use crate::package::traits::Package;
use crate::package::types::{
    Contributor, DependencyVersion, License, TypingVersion, TypingsDataRaw,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TypingsData {
    data: TypingsDataRaw,
    major: u64,
    minor: u64,
    is_latest: bool,
}

impl TypingsData {
    /// Wrap a raw record found under the version key `version`
    pub fn new(data: TypingsDataRaw, version: &Version, is_latest: bool) -> Self {
        Self {
            data,
            major: version.major,
            minor: version.minor,
            is_latest,
        }
    }

    /// Declared dependencies, in declaration order
    pub fn dependencies(&self) -> &IndexMap<String, DependencyVersion> {
        &self.data.dependencies
    }

    /// Packages used only by tests; these carry no version and resolve to latest
    pub fn test_dependencies(&self) -> &[String] {
        &self.data.test_dependencies
    }

    pub fn path_mappings(&self) -> &IndexMap<String, TypingVersion> {
        &self.data.path_mappings
    }

    pub fn path_mapping(&self, dependency: &str) -> Option<TypingVersion> {
        self.data.path_mappings.get(dependency).copied()
    }

    pub fn contributors(&self) -> &[Contributor] {
        &self.data.contributors
    }

    pub fn content_hash(&self) -> &str {
        &self.data.content_hash
    }

    pub fn project_name(&self) -> &str {
        &self.data.project_name
    }

    pub fn types_versions(&self) -> &[String] {
        &self.data.types_versions
    }

    pub fn files(&self) -> &[String] {
        &self.data.files
    }

    pub fn dts_files(&self) -> impl Iterator<Item = &str> {
        self.data
            .files
            .iter()
            .map(String::as_str)
            .filter(|f| f.ends_with(".d.ts"))
    }

    /// `v<X>` when this version lives in an older-version subdirectory
    pub fn version_directory_name(&self) -> Option<String> {
        self.data
            .library_version_directory_name
            .as_ref()
            .map(|dir| format!("v{dir}"))
    }

    /// Directory of this version relative to the types root
    pub fn sub_directory_path(&self) -> String {
        match self.version_directory_name() {
            Some(dir) if !self.is_latest => format!("{}/{}", self.data.typings_package_name, dir),
            _ => self.data.typings_package_name.clone(),
        }
    }
}

impl Package for TypingsData {
    fn name(&self) -> &str {
        &self.data.typings_package_name
    }

    fn library_name(&self) -> &str {
        &self.data.library_name
    }

    fn major(&self) -> u64 {
        self.major
    }

    fn minor(&self) -> u64 {
        self.minor
    }

    fn is_latest(&self) -> bool {
        self.is_latest
    }

    fn declared_modules(&self) -> &[String] {
        &self.data.declared_modules
    }

    fn globals(&self) -> &[String] {
        &self.data.globals
    }

    fn min_typescript_version(&self) -> &str {
        &self.data.min_ts_version
    }

    fn license(&self) -> License {
        self.data.license
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> TypingsDataRaw {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn latest_record_uses_bare_name() {
        let data = TypingsData::new(
            raw(json!({ "typingsPackageName": "widget", "libraryName": "Widget" })),
            &Version::new(2, 3, 0),
            true,
        );

        assert_eq!(data.desc(), "widget");
        assert_eq!(data.sub_directory_path(), "widget");
        assert_eq!(data.full_registry_name(), "@types/widget");
        assert_eq!(data.id().version.major, 2);
        assert_eq!(data.id().version.minor, 3);
    }

    #[test]
    fn older_record_lives_in_version_directory() {
        let data = TypingsData::new(
            raw(json!({
                "typingsPackageName": "widget",
                "libraryName": "Widget",
                "libraryVersionDirectoryName": "1"
            })),
            &Version::new(1, 0, 0),
            false,
        );

        assert_eq!(data.desc(), "widget v1.0");
        assert_eq!(data.version_directory_name().as_deref(), Some("v1"));
        assert_eq!(data.sub_directory_path(), "widget/v1");
    }

    #[test]
    fn scoped_record_names() {
        let data = TypingsData::new(
            raw(json!({ "typingsPackageName": "babel__core", "libraryName": "@babel/core" })),
            &Version::new(7, 1, 0),
            true,
        );

        assert_eq!(data.unescaped_name(), "@babel/core");
        assert_eq!(data.full_registry_name(), "@types/babel__core");
        assert_eq!(data.full_escaped_registry_name(), "@types%2fbabel__core");
    }

    #[test]
    fn dts_files_filters_non_declarations() {
        let data = TypingsData::new(
            raw(json!({
                "typingsPackageName": "widget",
                "libraryName": "Widget",
                "files": ["index.d.ts", "widget-tests.ts", "lib/util.d.ts"]
            })),
            &Version::new(1, 0, 0),
            true,
        );

        assert_eq!(
            data.dts_files().collect::<Vec<_>>(),
            vec!["index.d.ts", "lib/util.d.ts"]
        );
    }
}
