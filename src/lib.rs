//! In-memory registry and resolver for a monorepo of typings packages
//!
//! # Modules
//!
//! - [`mangle`]: scoped package name mangling
//! - [`package`]: package records (`TypingsData`, `NotNeededPackage`) and their raw inputs
//! - [`registry`]: per-package version sets and the registry built over them
//! - [`config`]: constants and logging configuration
//! - [`logging`]: tracing subscriber setup for host tools

pub mod config;
pub mod logging;
pub mod mangle;
pub mod package;
pub mod registry;

pub use package::{
    AnyPackage, DependencyVersion, License, NotNeededPackage, Package, PackageError, PackageId,
    PackageIdWithDefiniteVersion, TypingsData,
};
pub use registry::{AllPackages, TypingsVersions};
