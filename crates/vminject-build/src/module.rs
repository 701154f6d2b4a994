use crate::{
    artifact::{AnnotationSpec, Artifact, ArtifactKind, Expr, MethodSpec, ParamSpec, Stmt, TypeRef},
    naming,
};
use vminject_schema::{registry::Entity, types::ScopeKey, well_known};

/// Build the binding-module artifact for one scope: one provider function
/// per entity, in registry order, each registered into the multi-binding
/// map under the entity's qualified path.
#[must_use]
pub fn synthesize(scope: &ScopeKey, entities: &[Entity]) -> Artifact {
    Artifact {
        name: naming::module_name(scope),
        kind: ArtifactKind::Module,
        doc: naming::GENERATED_DOC.to_string(),
        annotations: vec![AnnotationSpec::marker(well_known::path(well_known::MODULE))],
        implements: None,
        fields: vec![],
        constructor: None,
        methods: entities.iter().map(provider_fn).collect(),
    }
}

// One provider function: the signature mirrors the entity's dependency
// list so the container resolves each parameter, and the body forwards
// them positionally to the entity's constructor.
fn provider_fn(entity: &Entity) -> MethodSpec {
    let params = entity
        .dependencies
        .iter()
        .map(|dep| ParamSpec::new(&dep.name, TypeRef::Named(dep.ty.clone())))
        .collect();
    let args = entity
        .dependencies
        .iter()
        .map(|dep| Expr::var(&dep.name))
        .collect();

    MethodSpec {
        name: naming::provider_fn_name(&entity.ty),
        annotations: vec![
            AnnotationSpec::marker(well_known::path(well_known::PROVIDES)),
            AnnotationSpec::marker(well_known::path(well_known::INTO_MAP)),
        ],
        params,
        ret: TypeRef::BoxedDyn(well_known::path(well_known::VIEW_MODEL)),
        takes_self: false,
        body: vec![Stmt::Return(Expr::Boxed(Box::new(Expr::Construct {
            ty: entity.ty.clone(),
            args,
        })))],
        binding_key: Some(entity.ty.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vminject_schema::types::{DependencyParam, TypePath};

    fn typ(s: &str) -> TypePath {
        TypePath::parse(s).unwrap()
    }

    fn entity(ty: &str, dependencies: Vec<DependencyParam>) -> Entity {
        Entity {
            ty: typ(ty),
            dependencies,
            scope: ScopeKey::Unscoped,
        }
    }

    #[test]
    fn one_provider_per_entity_in_registry_order() {
        let artifact = synthesize(
            &ScopeKey::Unscoped,
            &[entity("test::A", vec![]), entity("test::B", vec![])],
        );

        assert_eq!(artifact.simple_name(), "ViewModelInjectModule");
        let names: Vec<&str> = artifact.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["provide_test_A", "provide_test_B"]);
        assert!(artifact.verify().is_ok());
    }

    #[test]
    fn provider_declares_the_dependency_signature() {
        let deps = vec![DependencyParam::new("dep", typ("test::Dep"))];
        let artifact = synthesize(&ScopeKey::Unscoped, &[entity("test::Vm", deps)]);
        let method = &artifact.methods[0];

        assert_eq!(method.params.len(), 1);
        assert_eq!(method.params[0].name, "dep");
        assert!(
            matches!(&method.params[0].ty, TypeRef::Named(ty) if ty.to_string() == "test::Dep")
        );

        // The body forwards the parameter positionally into the constructor.
        let Stmt::Return(Expr::Boxed(inner)) = &method.body[0] else {
            panic!("provider body must box a constructor call");
        };
        let Expr::Construct { ty, args } = inner.as_ref() else {
            panic!("provider body must construct the entity");
        };
        assert_eq!(ty.to_string(), "test::Vm");
        assert_eq!(args, &[Expr::var("dep")]);
    }

    #[test]
    fn providers_are_keyed_by_entity_path() {
        let artifact = synthesize(&ScopeKey::Unscoped, &[entity("test::Vm", vec![])]);
        let method = &artifact.methods[0];

        assert_eq!(method.binding_key.as_ref().unwrap().to_string(), "test::Vm");
        let annotation_paths: Vec<String> = method
            .annotations
            .iter()
            .map(|a| a.path.to_string())
            .collect();
        assert_eq!(annotation_paths, ["di::provides", "di::into_map"]);
    }

    #[test]
    fn shared_simple_names_stay_distinct() {
        let artifact = synthesize(
            &ScopeKey::Unscoped,
            &[entity("first::Vm", vec![]), entity("second::Vm", vec![])],
        );

        assert!(artifact.verify().is_ok());
        assert_ne!(artifact.methods[0].name, artifact.methods[1].name);
        assert_ne!(
            artifact.methods[0].binding_key,
            artifact.methods[1].binding_key
        );
    }

    #[test]
    fn scoped_module_is_prefixed() {
        let scope = ScopeKey::Scoped(typ("test::CustomScope"));
        let artifact = synthesize(&scope, &[entity("test::Vm", vec![])]);

        assert_eq!(artifact.simple_name(), "CustomScopeViewModelInjectModule");
    }
}
