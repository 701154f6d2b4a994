use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vminject_schema::types::{TypePath, TypePathError};

/// Host option naming the unscoped factory artifact.
pub const FACTORY_NAME_OPTION: &str = "factory-name";

///
/// Config
///
/// Options recognized by the generator, parsed once per round from the
/// host's string option map.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Qualified override for the unscoped factory artifact. Scoped
    /// factories always use the scope-prefixed default.
    pub factory_name: Option<TypePath>,
}

impl Config {
    pub fn from_options(options: &BTreeMap<String, String>) -> Result<Self, TypePathError> {
        let factory_name = options
            .get(FACTORY_NAME_OPTION)
            .map(|value| TypePath::parse(value))
            .transpose()?;

        Ok(Self { factory_name })
    }
}
