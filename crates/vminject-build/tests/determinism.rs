//! Property tests: synthesis is a pure function of its input slice, and
//! provider naming never folds two distinct entities together.

use proptest::prelude::*;
use vminject_build::{factory, module, naming, render::render_source};
use vminject_schema::{
    registry::Entity,
    types::{ScopeKey, TypePath},
};
use std::collections::BTreeSet;

fn segment() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9]{0,6}"
}

fn type_path() -> impl Strategy<Value = TypePath> {
    prop::collection::vec(segment(), 1..4)
        .prop_map(|segments| TypePath::from_segments(segments).expect("segments are non-empty"))
}

fn entities() -> impl Strategy<Value = Vec<Entity>> {
    prop::collection::btree_set(type_path(), 1..8).prop_map(|paths| {
        paths
            .into_iter()
            .map(|ty| Entity {
                ty,
                dependencies: vec![],
                scope: ScopeKey::Unscoped,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn synthesizing_twice_yields_identical_artifacts(entities in entities()) {
        let scope = ScopeKey::Unscoped;

        let first = module::synthesize(&scope, &entities);
        let second = module::synthesize(&scope, &entities);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            render_source(&first).unwrap(),
            render_source(&second).unwrap()
        );

        let first = factory::synthesize(&scope, &entities, None);
        let second = factory::synthesize(&scope, &entities, None);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            render_source(&first).unwrap(),
            render_source(&second).unwrap()
        );
    }

    #[test]
    fn distinct_entities_never_share_a_provider_name(entities in entities()) {
        let names: BTreeSet<String> = entities
            .iter()
            .map(|entity| naming::provider_fn_name(&entity.ty))
            .collect();
        prop_assert_eq!(names.len(), entities.len());

        let artifact = module::synthesize(&ScopeKey::Unscoped, &entities);
        prop_assert!(artifact.verify().is_ok());
    }
}
