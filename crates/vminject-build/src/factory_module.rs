use crate::{
    artifact::{AnnotationSpec, Artifact, ArtifactKind, Expr, MethodSpec, ParamSpec, Stmt, TypeRef},
    naming,
};
use vminject_schema::{
    types::{ScopeKey, TypePath},
    well_known,
};

/// Build the factory-binding module for one scope: a module with a single
/// provider function that takes the scope's provider map and returns the
/// generated factory constructed from it, so the factory itself is
/// resolvable from the container graph.
#[must_use]
pub fn synthesize(scope: &ScopeKey, factory: &TypePath) -> Artifact {
    let view_model = well_known::path(well_known::VIEW_MODEL);
    let map_ty = TypeRef::map_of(
        TypeRef::KeyOf(view_model.clone()),
        TypeRef::ProviderOf(view_model),
    );

    Artifact {
        name: naming::factory_module_name(scope),
        kind: ArtifactKind::FactoryModule,
        doc: naming::GENERATED_DOC.to_string(),
        annotations: vec![AnnotationSpec::marker(well_known::path(well_known::MODULE))],
        implements: None,
        fields: vec![],
        constructor: None,
        methods: vec![MethodSpec {
            name: "provide_factory".to_string(),
            annotations: vec![AnnotationSpec::marker(well_known::path(
                well_known::PROVIDES,
            ))],
            params: vec![ParamSpec::new("providers", map_ty)],
            ret: TypeRef::Named(factory.clone()),
            takes_self: false,
            body: vec![Stmt::Return(Expr::Construct {
                ty: factory.clone(),
                args: vec![Expr::var("providers")],
            })],
            binding_key: None,
        }],
    }
}
