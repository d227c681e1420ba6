//! Package records
//!
//! - [`traits`]: the `Package` capability trait and the `AnyPackage` sum type
//! - [`typings`]: `TypingsData`, one version of a maintained package
//! - [`not_needed`]: `NotNeededPackage`, a deprecation stub
//! - [`types`]: ids, dependency versions, license and raw input structs
//! - [`semver`]: version key parsing
//! - [`error`]: `PackageError`

pub mod error;
pub mod not_needed;
pub mod semver;
pub mod traits;
pub mod types;
pub mod typings;

pub use error::PackageError;
pub use not_needed::{NotNeededPackage, read_not_needed};
pub use traits::{AnyPackage, Package, full_registry_name};
pub use types::{
    AllTypesDataRaw, Contributor, DependencyVersion, HeaderVersion, License, PackageId,
    PackageIdWithDefiniteVersion, TypingVersion, TypingsDataRaw, TypingsVersionsRaw,
    format_dependency_version,
};
pub use typings::TypingsData;
