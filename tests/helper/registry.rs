//! Registry test utilities

use serde_json::{Value, json};

use typings_registry::package::{AllTypesDataRaw, NotNeededPackage, TypingsDataRaw};
use typings_registry::AllPackages;

/// Builds raw versioned package data, keeping packages in insertion order
#[derive(Default)]
pub struct TypesDataBuilder {
    data: AllTypesDataRaw,
}

impl TypesDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add version `key` ("<major>.<minor>") of `name`.
    ///
    /// `extra` holds additional raw fields (dependencies, pathMappings, ...).
    pub fn with_version(mut self, name: &str, key: &str, extra: Value) -> Self {
        let mut raw = json!({
            "typingsPackageName": name,
            "libraryName": format!("{name} {key}"),
        });
        if let (Some(target), Value::Object(fields)) = (raw.as_object_mut(), extra) {
            target.extend(fields);
        }
        let raw: TypingsDataRaw = serde_json::from_value(raw).unwrap();

        self.data
            .entry(name.to_string())
            .or_default()
            .insert(key.to_string(), raw);
        self
    }

    pub fn build(self) -> AllTypesDataRaw {
        self.data
    }

    pub fn registry(self, not_needed: Vec<NotNeededPackage>) -> AllPackages {
        AllPackages::new(self.build(), not_needed).unwrap()
    }
}

pub fn not_needed(name: &str, as_of_version: &str) -> NotNeededPackage {
    NotNeededPackage::new(name, name, as_of_version, None).unwrap()
}
