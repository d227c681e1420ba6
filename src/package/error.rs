use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("No typings found with name '{0}'")]
    UnknownPackage(String),

    #[error("Could not find version {version} of '{name}'.{}", context_suffix(.context))]
    UnmatchedVersion {
        name: String,
        version: String,
        context: Option<String>,
    },

    #[error("More than one package maps to the registry key '{0}'")]
    DuplicatePackage(String),

    #[error("No typings available for {0}")]
    NoTypingsFor(String),

    #[error("Not-needed package '{0}' must use all lower-case letters")]
    NameNotLowercase(String),

    #[error("Not-needed package '{name}' must use a libraryName that is all lower-case letters, found '{library_name}'")]
    LibraryNameNotLowercase { name: String, library_name: String },

    #[error("Unexpected key in not-needed package '{name}': {key}")]
    UnexpectedKey { name: String, key: String },

    #[error("Package '{name}' is missing required field '{field}'")]
    MissingField { name: String, field: &'static str },

    #[error("Package '{name}' has an invalid value for '{field}'")]
    InvalidField { name: String, field: &'static str },

    #[error("Invalid version '{value}': {source}")]
    InvalidVersion {
        value: String,
        #[source]
        source: semver::Error,
    },

    #[error("Invalid version key '{key}' for package '{name}'")]
    InvalidVersionKey { name: String, key: String },

    #[error("Specifying '\"license\": \"MIT\"' is redundant, this is the default")]
    RedundantLicense,

    #[error("License is \"{0}\", expected one of: \"MIT\", \"Apache-2.0\"")]
    InvalidLicense(String),

    #[error("Package '{0}' has no versions")]
    EmptyVersionSet(String),

    #[error("Packages are not sorted by name: '{previous}' comes before '{next}'")]
    NotSorted { previous: String, next: String },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn context_suffix(context: &Option<String>) -> String {
    context
        .as_deref()
        .map(|c| format!(" {c}"))
        .unwrap_or_default()
}
