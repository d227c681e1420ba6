//! The registry: every typings package and every not-needed stub

use indexmap::IndexMap;
use tracing::{debug, error};

use crate::mangle::mangle;
use crate::package::error::PackageError;
use crate::package::not_needed::{NotNeededPackage, read_not_needed};
use crate::package::traits::{AnyPackage, Package};
use crate::package::types::{AllTypesDataRaw, PackageId, PackageIdWithDefiniteVersion};
use crate::package::typings::TypingsData;
use crate::registry::versions::TypingsVersions;

/// Read-only model of the whole repository, built once from loaded data
#[derive(Debug, Clone, PartialEq)]
pub struct AllPackages {
    /// Registry key -> versions, in input order
    data: IndexMap<String, TypingsVersions>,
    not_needed: Vec<NotNeededPackage>,
}

impl AllPackages {
    pub fn new(
        data: AllTypesDataRaw,
        not_needed: Vec<NotNeededPackage>,
    ) -> Result<Self, PackageError> {
        let mut by_key = IndexMap::with_capacity(data.len());
        for (name, versions) in data {
            let key = mangle(&name);
            let versions = TypingsVersions::new(&key, versions)?;
            if by_key.insert(key.clone(), versions).is_some() {
                return Err(PackageError::DuplicatePackage(key));
            }
        }

        Ok(Self::from_versions(by_key, not_needed))
    }

    pub fn from_versions(
        data: IndexMap<String, TypingsVersions>,
        not_needed: Vec<NotNeededPackage>,
    ) -> Self {
        debug!(
            "Registry built with {} typings package(s) and {} not-needed package(s)",
            data.len(),
            not_needed.len()
        );
        Self { data, not_needed }
    }

    /// Build from the text of the versioned package data and the deprecation file
    pub fn from_json(types_data: &str, not_needed: &str) -> Result<Self, PackageError> {
        let data: AllTypesDataRaw = serde_json::from_str(types_data)?;
        Self::new(data, read_not_needed(not_needed)?)
    }

    /// Versions of a package, looked up by scoped or registry-key name
    pub fn versions(&self, name: &str) -> Option<&TypingsVersions> {
        self.data.get(&mangle(name))
    }

    fn known_versions(&self, name: &str) -> Result<&TypingsVersions, PackageError> {
        self.versions(name)
            .ok_or_else(|| PackageError::UnknownPackage(name.to_string()))
    }

    pub fn get_not_needed_package(&self, name: &str) -> Option<&NotNeededPackage> {
        self.not_needed.iter().find(|pkg| pkg.name() == name)
    }

    pub fn has_typing_for(&self, id: &PackageId) -> bool {
        self.try_get_typings_data(id).is_some()
    }

    /// Resolve to the definite version of the matching record
    pub fn resolve(&self, id: &PackageId) -> Result<PackageIdWithDefiniteVersion, PackageError> {
        Ok(self.known_versions(&id.name)?.get(&id.version, None)?.id())
    }

    /// Like [`resolve`](Self::resolve), but hands back `id` unchanged when nothing matches
    pub fn try_resolve(&self, id: &PackageId) -> PackageId {
        self.try_get_typings_data(id)
            .map(|data| data.id().into())
            .unwrap_or_else(|| id.clone())
    }

    pub fn get_typings_data(&self, id: &PackageId) -> Result<&TypingsData, PackageError> {
        self.try_get_typings_data(id)
            .ok_or_else(|| PackageError::NoTypingsFor(id.to_string()))
    }

    pub fn try_get_typings_data(&self, id: &PackageId) -> Option<&TypingsData> {
        self.versions(&id.name)?.try_get(&id.version)
    }

    /// Latest version of the package `pkg` belongs to
    pub fn get_latest<'a>(&'a self, pkg: &'a TypingsData) -> Result<&'a TypingsData, PackageError> {
        if pkg.is_latest() {
            Ok(pkg)
        } else {
            self.get_latest_version(pkg.name())
        }
    }

    pub fn get_latest_version(&self, name: &str) -> Result<&TypingsData, PackageError> {
        self.known_versions(name)?.get_latest()
    }

    pub fn try_get_latest_version(&self, name: &str) -> Option<&TypingsData> {
        self.versions(name)?.try_get_latest()
    }

    pub fn has_separate_minor_versions(&self, name: &str) -> Result<bool, PackageError> {
        Ok(self.known_versions(name)?.has_separate_minor_versions())
    }

    /// Every stored version of every package
    pub fn all_typings(&self) -> Result<Vec<&TypingsData>, PackageError> {
        assert_sorted(
            self.data
                .values()
                .flat_map(|versions| versions.get_all())
                .collect(),
        )
    }

    /// The latest version of every package
    pub fn all_latest_typings(&self) -> Result<Vec<&TypingsData>, PackageError> {
        let latest = self
            .data
            .values()
            .map(|versions| versions.get_latest())
            .collect::<Result<Vec<_>, _>>()?;
        assert_sorted(latest)
    }

    pub fn all_not_needed(&self) -> &[NotNeededPackage] {
        &self.not_needed
    }

    /// All typings followed by all not-needed packages
    pub fn all_packages(&self) -> Result<Vec<AnyPackage<'_>>, PackageError> {
        Ok(self
            .all_typings()?
            .into_iter()
            .map(AnyPackage::from)
            .chain(self.not_needed.iter().map(AnyPackage::from))
            .collect())
    }

    /// Records `pkg` depends on: declared dependencies in declaration order,
    /// then test dependencies in declaration order.
    ///
    /// Dependencies with no typings in the registry are skipped. Test
    /// dependencies resolve through their path mapping if one exists, else to latest.
    pub fn all_dependency_typings<'a>(
        &'a self,
        pkg: &'a TypingsData,
    ) -> impl Iterator<Item = Result<&'a TypingsData, PackageError>> + 'a {
        let dependencies = pkg
            .dependencies()
            .iter()
            .filter_map(move |(name, version)| {
                let versions = self.dependency_versions(pkg, name)?;
                let context = pkg
                    .path_mapping(name)
                    .map(|_| format!("{} has a path mapping for {}", pkg.desc(), name));
                Some(versions.get(version, context.as_deref()))
            });

        let test_dependencies = pkg.test_dependencies().iter().filter_map(move |name| {
            let versions = self.dependency_versions(pkg, name)?;
            Some(match pkg.path_mapping(name) {
                Some(mapping) => versions.get(&mapping.into(), None),
                None => versions.get_latest(),
            })
        });

        dependencies.chain(test_dependencies)
    }

    fn dependency_versions(&self, pkg: &TypingsData, name: &str) -> Option<&TypingsVersions> {
        let versions = self.versions(name);
        if versions.is_none() {
            debug!("{} depends on {}, which has no typings; skipping", pkg.desc(), name);
        }
        versions
    }
}

/// Check that records are ordered by name without reordering them
fn assert_sorted<T: Package>(items: Vec<&T>) -> Result<Vec<&T>, PackageError> {
    if let Some(pair) = items.windows(2).find(|pair| pair[0].name() > pair[1].name()) {
        error!(
            "Internal consistency failure: '{}' is listed before '{}'",
            pair[0].name(),
            pair[1].name()
        );
        return Err(PackageError::NotSorted {
            previous: pair[0].name().to_string(),
            next: pair[1].name().to_string(),
        });
    }
    Ok(items)
}
