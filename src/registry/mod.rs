//! Version sets and the registry built over them
//!
//! - [`versions`]: `TypingsVersions`, all versions of one package, newest first
//! - [`all_packages`]: `AllPackages`, lookups and dependency resolution

pub mod all_packages;
pub mod versions;

pub use all_packages::AllPackages;
pub use versions::TypingsVersions;
