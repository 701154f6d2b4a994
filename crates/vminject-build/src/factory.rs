use crate::{
    artifact::{
        AnnotationSpec, Artifact, ArtifactKind, CtorSpec, Expr, FieldSpec, MethodSpec, ParamSpec,
        Stmt, TypeRef,
    },
    naming,
};
use vminject_schema::{
    registry::Entity,
    types::{ScopeKey, TypePath},
    well_known,
};

/// Build the provider-factory artifact for one scope.
///
/// The factory holds one field, a map from type key to lazy provider,
/// supplied through its sole constructor by the container; it never builds
/// the map itself. Its `create` method resolves a requested key to a
/// constructed instance or fails loudly.
#[must_use]
pub fn synthesize(
    scope: &ScopeKey,
    entities: &[Entity],
    configured_name: Option<&TypePath>,
) -> Artifact {
    let view_model = well_known::path(well_known::VIEW_MODEL);
    let factory_error = well_known::path(well_known::FACTORY_ERROR);

    let map_ty = TypeRef::map_of(
        TypeRef::KeyOf(view_model.clone()),
        TypeRef::ProviderOf(view_model.clone()),
    );

    let create = MethodSpec {
        name: "create".to_string(),
        annotations: vec![],
        params: vec![ParamSpec::new(
            "requested",
            TypeRef::reference(TypeRef::KeyOf(view_model.clone())),
        )],
        ret: TypeRef::result_of(
            TypeRef::BoxedDyn(view_model),
            TypeRef::Named(factory_error.clone()),
        ),
        takes_self: true,
        body: vec![
            // 1-2: look the requested key up, fail for unbound types.
            Stmt::LetElseFail {
                name: "provider".to_string(),
                expr: Expr::call(
                    Expr::SelfField("providers".to_string()),
                    "get",
                    vec![Expr::var("requested")],
                ),
                error: Expr::error_variant(factory_error.clone(), "UnboundType"),
            },
            // 3: invoke the provider.
            Stmt::Let {
                name: "instance".to_string(),
                expr: Expr::call(Expr::var("provider"), "get", vec![]),
            },
            // 4: the provider must have produced the requested type.
            Stmt::FailIf {
                cond: Expr::Not(Box::new(Expr::call(
                    Expr::var("requested"),
                    "is_instance",
                    vec![Expr::call(Expr::var("instance"), "as_ref", vec![])],
                ))),
                error: Expr::error_variant(factory_error, "TypeMismatch"),
            },
            // 5: hand the instance back.
            Stmt::Return(Expr::Ok(Box::new(Expr::var("instance")))),
        ],
        binding_key: None,
    };

    let supported = entities
        .iter()
        .map(|entity| entity.ty.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    Artifact {
        name: naming::factory_name(scope, configured_name),
        kind: ArtifactKind::Factory,
        doc: format!("{} Resolves: {supported}.", naming::GENERATED_DOC),
        annotations: vec![],
        implements: Some(well_known::path(well_known::FACTORY_TRAIT)),
        fields: vec![FieldSpec::new("providers", map_ty.clone())],
        constructor: Some(CtorSpec {
            annotations: vec![AnnotationSpec::marker(well_known::path(well_known::INJECT))],
            params: vec![ParamSpec::new("providers", map_ty)],
        }),
        methods: vec![create],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vminject_schema::types::DependencyParam;

    fn path(s: &str) -> TypePath {
        TypePath::parse(s).unwrap()
    }

    fn entity(ty: &str) -> Entity {
        Entity {
            ty: path(ty),
            dependencies: vec![DependencyParam::new("dep", path("test::Dep"))],
            scope: ScopeKey::Unscoped,
        }
    }

    #[test]
    fn factory_shape_matches_the_contract() {
        let artifact = synthesize(&ScopeKey::Unscoped, &[entity("test::Vm")], None);

        assert_eq!(artifact.simple_name(), "GeneratedViewModelFactory");
        assert_eq!(artifact.package().unwrap().to_string(), "vminject_gen");
        assert_eq!(artifact.kind, ArtifactKind::Factory);
        assert_eq!(
            artifact.implements.as_ref().unwrap().to_string(),
            "vminject_runtime::ViewModelFactory"
        );
        assert_eq!(artifact.fields.len(), 1);
        assert_eq!(artifact.fields[0].name, "providers");
        assert_eq!(artifact.methods.len(), 1);
        assert_eq!(artifact.methods[0].name, "create");
        assert!(artifact.verify().is_ok());
    }

    #[test]
    fn constructor_is_injected_and_takes_the_map() {
        let artifact = synthesize(&ScopeKey::Unscoped, &[entity("test::Vm")], None);
        let ctor = artifact.constructor.as_ref().unwrap();

        assert_eq!(ctor.annotations[0].path.to_string(), "di::inject");
        assert_eq!(ctor.params.len(), 1);
        assert_eq!(ctor.params[0].name, "providers");
        assert!(matches!(ctor.params[0].ty, TypeRef::MapOf(_, _)));
    }

    #[test]
    fn create_fails_unbound_then_checks_assignability() {
        let artifact = synthesize(&ScopeKey::Unscoped, &[entity("test::Vm")], None);
        let body = &artifact.methods[0].body;

        assert_eq!(body.len(), 4);
        assert!(
            matches!(&body[0], Stmt::LetElseFail { error: Expr::ErrorVariant { variant, .. }, .. } if variant == "UnboundType")
        );
        assert!(
            matches!(&body[2], Stmt::FailIf { error: Expr::ErrorVariant { variant, .. }, .. } if variant == "TypeMismatch")
        );
        assert!(matches!(&body[3], Stmt::Return(Expr::Ok(_))));
    }

    #[test]
    fn artifact_model_serializes_for_build_logs() {
        let artifact = synthesize(&ScopeKey::Unscoped, &[entity("test::Vm")], None);

        let value = serde_json::to_value(&artifact).unwrap();
        assert_eq!(value["kind"], "Factory");
        assert_eq!(value["methods"][0]["name"], "create");
    }

    #[test]
    fn doc_lists_the_supported_entities() {
        let artifact = synthesize(
            &ScopeKey::Unscoped,
            &[entity("test::A"), entity("test::B")],
            None,
        );

        assert!(artifact.doc.contains("test::A, test::B"));
    }
}
