//! Deprecation stubs for libraries that ship their own types

use indexmap::IndexMap;
use semver::Version;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::LOWEST_TYPESCRIPT_VERSION;
use crate::package::error::PackageError;
use crate::package::semver::parse_full_version;
use crate::package::traits::{Package, full_registry_name};
use crate::package::types::License;

const LIBRARY_NAME: &str = "libraryName";
const SOURCE_REPO_URL: &str = "sourceRepoURL";
const AS_OF_VERSION: &str = "asOfVersion";
const ALLOWED_KEYS: &[&str] = &[LIBRARY_NAME, SOURCE_REPO_URL, AS_OF_VERSION];

/// A package that is no longer needed; exactly one version exists and it is always latest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotNeededPackage {
    name: String,
    library_name: String,
    source_repo_url: Option<String>,
    version: Version,
}

impl NotNeededPackage {
    pub fn new(
        name: &str,
        library_name: &str,
        as_of_version: &str,
        source_repo_url: Option<&str>,
    ) -> Result<Self, PackageError> {
        if name != name.to_lowercase() {
            return Err(PackageError::NameNotLowercase(name.to_string()));
        }
        if library_name != library_name.to_lowercase() {
            return Err(PackageError::LibraryNameNotLowercase {
                name: name.to_string(),
                library_name: library_name.to_string(),
            });
        }
        if name.is_empty() {
            return Err(missing(name, "name"));
        }
        if library_name.is_empty() {
            return Err(missing(name, LIBRARY_NAME));
        }
        if as_of_version.is_empty() {
            return Err(missing(name, AS_OF_VERSION));
        }

        Ok(Self {
            name: name.to_string(),
            library_name: library_name.to_string(),
            source_repo_url: source_repo_url.map(str::to_string),
            version: parse_full_version(as_of_version)?,
        })
    }

    /// Validate one entry of the deprecation file.
    ///
    /// Checks run in order: lower-case name, no unexpected keys, lower-case
    /// library name, required fields present, parsable `asOfVersion`.
    pub fn from_raw(name: &str, raw: &Map<String, Value>) -> Result<Self, PackageError> {
        if name != name.to_lowercase() {
            return Err(PackageError::NameNotLowercase(name.to_string()));
        }

        if let Some(key) = raw.keys().find(|key| !ALLOWED_KEYS.contains(&key.as_str())) {
            return Err(PackageError::UnexpectedKey {
                name: name.to_string(),
                key: key.clone(),
            });
        }

        let library_name = string_field(name, raw, LIBRARY_NAME)?;
        if let Some(library_name) = library_name
            && library_name != library_name.to_lowercase()
        {
            return Err(PackageError::LibraryNameNotLowercase {
                name: name.to_string(),
                library_name: library_name.to_string(),
            });
        }

        let as_of_version = string_field(name, raw, AS_OF_VERSION)?;
        let source_repo_url = string_field(name, raw, SOURCE_REPO_URL)?;

        Self::new(
            name,
            library_name.unwrap_or_default(),
            as_of_version.unwrap_or_default(),
            source_repo_url,
        )
    }

    /// Semantic version as of which the library provides its own types
    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn source_repo_url(&self) -> Option<&str> {
        self.source_repo_url.as_deref()
    }

    pub fn deprecated_message(&self) -> String {
        format!(
            "This is a stub types definition. {} provides its own type definitions, so you do not need this installed.",
            self.library_name
        )
    }

    pub fn readme(&self) -> String {
        let title = match &self.source_repo_url {
            Some(url) => format!(
                "This is a stub types definition for {} ({}).",
                self.library_name, url
            ),
            None => format!("This is a stub types definition for {}.", self.library_name),
        };
        format!(
            "{}\n\n{} provides its own type definitions, so you don't need {} installed!",
            title,
            self.library_name,
            full_registry_name(&self.name)
        )
    }
}

impl Package for NotNeededPackage {
    fn name(&self) -> &str {
        &self.name
    }

    fn library_name(&self) -> &str {
        &self.library_name
    }

    fn major(&self) -> u64 {
        self.version.major
    }

    fn minor(&self) -> u64 {
        self.version.minor
    }

    fn is_latest(&self) -> bool {
        true
    }

    fn declared_modules(&self) -> &[String] {
        &[]
    }

    fn globals(&self) -> &[String] {
        &[]
    }

    fn min_typescript_version(&self) -> &str {
        LOWEST_TYPESCRIPT_VERSION
    }

    fn license(&self) -> License {
        License::Mit
    }
}

/// Input B: the deprecation file
#[derive(Debug, Deserialize)]
struct NotNeededFile {
    packages: IndexMap<String, Map<String, Value>>,
}

/// Parse and validate the deprecation file, keeping its entry order
pub fn read_not_needed(json: &str) -> Result<Vec<NotNeededPackage>, PackageError> {
    let file: NotNeededFile = serde_json::from_str(json)?;
    file.packages
        .iter()
        .map(|(name, raw)| NotNeededPackage::from_raw(name, raw))
        .collect()
}

fn missing(name: &str, field: &'static str) -> PackageError {
    PackageError::MissingField {
        name: name.to_string(),
        field,
    }
}

fn string_field<'a>(
    name: &str,
    raw: &'a Map<String, Value>,
    field: &'static str,
) -> Result<Option<&'a str>, PackageError> {
    match raw.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(PackageError::InvalidField {
            name: name.to_string(),
            field,
        }),
    }
}
