//! Deterministic naming of generated artifacts and members.

use vminject_schema::{
    types::{ScopeKey, TypePath},
    well_known,
};

pub const FACTORY_SIMPLE_NAME: &str = "GeneratedViewModelFactory";
pub const FACTORY_MODULE_SIMPLE_NAME: &str = "GeneratedViewModelFactoryModule";
pub const MODULE_SIMPLE_NAME: &str = "ViewModelInjectModule";

/// Doc header attached to every generated artifact.
pub(crate) const GENERATED_DOC: &str =
    "Generated by the vminject processor; do not edit by hand.";

/// Factory artifact name for a scope. The configured override applies to
/// the unscoped group only; scoped factories always use the scope-prefixed
/// default.
#[must_use]
pub fn factory_name(scope: &ScopeKey, configured: Option<&TypePath>) -> TypePath {
    if let (ScopeKey::Unscoped, Some(configured)) = (scope, configured) {
        return qualified(configured);
    }

    default_name(scope, FACTORY_SIMPLE_NAME)
}

#[must_use]
pub fn module_name(scope: &ScopeKey) -> TypePath {
    default_name(scope, MODULE_SIMPLE_NAME)
}

#[must_use]
pub fn factory_module_name(scope: &ScopeKey) -> TypePath {
    default_name(scope, FACTORY_MODULE_SIMPLE_NAME)
}

/// Provider-function name for an entity, derived from its qualified path
/// with `_` joining the segments. Underscores inside a segment are doubled
/// so two entities with distinct paths can never produce the same name,
/// even when their simple names match.
#[must_use]
pub fn provider_fn_name(ty: &TypePath) -> String {
    let joined = ty
        .segments()
        .iter()
        .map(|segment| segment.replace('_', "__"))
        .collect::<Vec<_>>()
        .join("_");

    format!("provide_{joined}")
}

fn default_name(scope: &ScopeKey, simple: &str) -> TypePath {
    let simple = match scope.simple_name() {
        Some(prefix) => format!("{prefix}{simple}"),
        None => simple.to_string(),
    };

    well_known::path(well_known::DEFAULT_PACKAGE).join(&simple)
}

// A bare configured name lands in the default package; a qualified one
// keeps its own.
fn qualified(configured: &TypePath) -> TypePath {
    if configured.qualifier().is_some() {
        configured.clone()
    } else {
        well_known::path(well_known::DEFAULT_PACKAGE).join(configured.simple_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> TypePath {
        TypePath::parse(s).unwrap()
    }

    fn custom_scope() -> ScopeKey {
        ScopeKey::Scoped(path("test::CustomScope"))
    }

    #[test]
    fn unscoped_defaults() {
        assert_eq!(
            factory_name(&ScopeKey::Unscoped, None).to_string(),
            "vminject_gen::GeneratedViewModelFactory"
        );
        assert_eq!(
            module_name(&ScopeKey::Unscoped).to_string(),
            "vminject_gen::ViewModelInjectModule"
        );
        assert_eq!(
            factory_module_name(&ScopeKey::Unscoped).to_string(),
            "vminject_gen::GeneratedViewModelFactoryModule"
        );
    }

    #[test]
    fn scoped_names_carry_the_scope_prefix() {
        assert_eq!(
            factory_name(&custom_scope(), None).to_string(),
            "vminject_gen::CustomScopeGeneratedViewModelFactory"
        );
        assert_eq!(
            module_name(&custom_scope()).to_string(),
            "vminject_gen::CustomScopeViewModelInjectModule"
        );
    }

    #[test]
    fn configured_name_overrides_the_unscoped_factory_only() {
        let configured = path("myapp::di::TestFactory");

        let unscoped = factory_name(&ScopeKey::Unscoped, Some(&configured));
        assert_eq!(unscoped.to_string(), "myapp::di::TestFactory");
        assert_eq!(unscoped.simple_name(), "TestFactory");

        let scoped = factory_name(&custom_scope(), Some(&configured));
        assert_eq!(
            scoped.to_string(),
            "vminject_gen::CustomScopeGeneratedViewModelFactory"
        );
    }

    #[test]
    fn bare_configured_name_lands_in_the_default_package() {
        let configured = path("TestFactory");

        assert_eq!(
            factory_name(&ScopeKey::Unscoped, Some(&configured)).to_string(),
            "vminject_gen::TestFactory"
        );
    }

    #[test]
    fn provider_names_follow_the_qualified_path() {
        assert_eq!(provider_fn_name(&path("test::Vm")), "provide_test_Vm");
    }

    #[test]
    fn provider_names_never_collide_for_distinct_paths() {
        // Same simple name, different qualifier.
        assert_ne!(
            provider_fn_name(&path("first::Vm")),
            provider_fn_name(&path("second::Vm"))
        );
        // Underscore boundaries must not fold distinct paths together.
        assert_ne!(
            provider_fn_name(&path("a::b::C")),
            provider_fn_name(&path("a_b::C"))
        );
    }
}
