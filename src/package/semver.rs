use semver::Version;

use crate::package::error::PackageError;

/// Parse a version directory key into a semver::Version.
///
/// Keys are `"<major>.<minor>"`; patch is not part of a typings package's
/// identity and is fixed at 0. A bare `"<major>"` is padded the same way.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "2.3" -> Version(2, 3, 0)
/// - "1.2.3" -> None
pub fn parse_version_key(key: &str) -> Option<Version> {
    let parts: Vec<&str> = key.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => return None,
    };
    Version::parse(&normalized)
        .ok()
        .filter(|v| v.pre.is_empty() && v.build.is_empty())
}

/// Parse a full three-part semantic version such as a not-needed package's `asOfVersion`
pub fn parse_full_version(value: &str) -> Result<Version, PackageError> {
    Version::parse(value).map_err(|source| PackageError::InvalidVersion {
        value: value.to_string(),
        source,
    })
}
