//! Scoped package name mangling
//!
//! Registry keys fold a package's scope into its name so scoped packages can
//! live in a flat directory layout: `@foo/bar` is stored as `foo__bar`.

const SCOPE_MARKER: char = '@';
const SEPARATOR: char = '/';
const MANGLED_SEPARATOR: &str = "__";

/// Map a (possibly scoped) package name to its registry key.
///
/// Only names of the form `@<scope>/<name>` are rewritten; anything else,
/// including already-mangled keys, is returned unchanged.
pub fn mangle(name: &str) -> String {
    if let Some(rest) = name.strip_prefix(SCOPE_MARKER)
        && let Some((scope, package)) = rest.split_once(SEPARATOR)
        && !package.contains(SEPARATOR)
    {
        return format!("{scope}{MANGLED_SEPARATOR}{package}");
    }
    name.to_string()
}

/// Recover the scoped form of a registry key for display: `foo__bar` -> `@foo/bar`.
pub fn unmangle(key: &str) -> String {
    match key.split_once(MANGLED_SEPARATOR) {
        Some((scope, package)) => format!("{SCOPE_MARKER}{scope}{SEPARATOR}{package}"),
        None => key.to_string(),
    }
}
