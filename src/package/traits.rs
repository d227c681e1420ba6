//! Capabilities shared by every package record

use crate::config::SCOPE;
use crate::mangle::{mangle, unmangle};
use crate::package::not_needed::NotNeededPackage;
use crate::package::types::{HeaderVersion, License, PackageIdWithDefiniteVersion};
use crate::package::typings::TypingsData;

/// Identity, version and declared surface of a package record
pub trait Package {
    /// Name in registry key form, as stored in the raw data
    fn name(&self) -> &str;

    fn library_name(&self) -> &str;

    fn major(&self) -> u64;

    fn minor(&self) -> u64;

    /// Whether this is the current version of its logical package
    fn is_latest(&self) -> bool;

    /// Module names declared with `declare module "..."`
    fn declared_modules(&self) -> &[String];

    fn globals(&self) -> &[String];

    fn min_typescript_version(&self) -> &str;

    fn license(&self) -> License;

    /// Scoped form of the name for display (`babel__core` -> `@babel/core`)
    fn unescaped_name(&self) -> String {
        unmangle(self.name())
    }

    /// `@types/<name>`
    fn full_registry_name(&self) -> String {
        full_registry_name(self.name())
    }

    /// `@types%2f<name>`, as used in registry URLs
    fn full_escaped_registry_name(&self) -> String {
        format!("@{SCOPE}%2f{}", mangle(self.name()))
    }

    fn id(&self) -> PackageIdWithDefiniteVersion {
        PackageIdWithDefiniteVersion {
            name: self.name().to_string(),
            version: HeaderVersion {
                major: self.major(),
                minor: self.minor(),
            },
        }
    }

    /// Short label for logs and error messages
    fn desc(&self) -> String {
        if self.is_latest() {
            self.name().to_string()
        } else {
            format!("{} v{}.{}", self.name(), self.major(), self.minor())
        }
    }
}

/// Name under which a typings package is published
pub fn full_registry_name(name: &str) -> String {
    format!("@{SCOPE}/{}", mangle(name))
}

/// Either kind of package record
#[derive(Debug, Clone, Copy)]
pub enum AnyPackage<'a> {
    Typings(&'a TypingsData),
    NotNeeded(&'a NotNeededPackage),
}

impl<'a> AnyPackage<'a> {
    pub fn is_not_needed(&self) -> bool {
        matches!(self, AnyPackage::NotNeeded(_))
    }

    pub fn as_typings(&self) -> Option<&'a TypingsData> {
        match *self {
            AnyPackage::Typings(typings) => Some(typings),
            AnyPackage::NotNeeded(_) => None,
        }
    }

    pub fn as_not_needed(&self) -> Option<&'a NotNeededPackage> {
        match *self {
            AnyPackage::Typings(_) => None,
            AnyPackage::NotNeeded(not_needed) => Some(not_needed),
        }
    }

    fn inner(&self) -> &'a dyn Package {
        match *self {
            AnyPackage::Typings(typings) => typings,
            AnyPackage::NotNeeded(not_needed) => not_needed,
        }
    }
}

impl Package for AnyPackage<'_> {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn library_name(&self) -> &str {
        self.inner().library_name()
    }

    fn major(&self) -> u64 {
        self.inner().major()
    }

    fn minor(&self) -> u64 {
        self.inner().minor()
    }

    fn is_latest(&self) -> bool {
        self.inner().is_latest()
    }

    fn declared_modules(&self) -> &[String] {
        self.inner().declared_modules()
    }

    fn globals(&self) -> &[String] {
        self.inner().globals()
    }

    fn min_typescript_version(&self) -> &str {
        self.inner().min_typescript_version()
    }

    fn license(&self) -> License {
        self.inner().license()
    }
}

impl<'a> From<&'a TypingsData> for AnyPackage<'a> {
    fn from(typings: &'a TypingsData) -> Self {
        AnyPackage::Typings(typings)
    }
}

impl<'a> From<&'a NotNeededPackage> for AnyPackage<'a> {
    fn from(not_needed: &'a NotNeededPackage) -> Self {
        AnyPackage::NotNeeded(not_needed)
    }
}
