//! Qualified names the generator agrees on with the runtime crate and the
//! host container. Generated artifacts reference these paths; nothing here
//! is resolved at generator build time.

use crate::types::TypePath;

/// Base injectable capability every entity must be a subtype of.
pub const VIEW_MODEL: &str = "vminject_runtime::ViewModel";

/// Factory capability implemented by generated factory artifacts.
pub const FACTORY_TRAIT: &str = "vminject_runtime::ViewModelFactory";

/// Runtime key type of the provider map.
pub const TYPE_KEY: &str = "vminject_runtime::TypeKey";

/// Lazy provider stored as the provider-map value.
pub const PROVIDER: &str = "vminject_runtime::Provider";

/// Invalid-usage error raised by generated factory code.
pub const FACTORY_ERROR: &str = "vminject_runtime::FactoryError";

/// Host-container attributes attached to generated members.
pub const INJECT: &str = "di::inject";
pub const MODULE: &str = "di::module";
pub const PROVIDES: &str = "di::provides";
pub const INTO_MAP: &str = "di::into_map";
pub const BINDING_KEY: &str = "di::binding_key";

/// Package that receives every generated artifact unless a configured name
/// carries its own qualifier.
pub const DEFAULT_PACKAGE: &str = "vminject_gen";

/// Parse a well-known constant into a path.
#[must_use]
pub fn path(name: &str) -> TypePath {
    TypePath::parse(name).expect("well-known paths are valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_constants_parse() {
        for name in [
            VIEW_MODEL,
            FACTORY_TRAIT,
            TYPE_KEY,
            PROVIDER,
            FACTORY_ERROR,
            INJECT,
            MODULE,
            PROVIDES,
            INTO_MAP,
            BINDING_KEY,
            DEFAULT_PACKAGE,
        ] {
            assert!(TypePath::parse(name).is_ok(), "constant '{name}' must parse");
        }
    }
}
