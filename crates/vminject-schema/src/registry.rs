use crate::types::{DependencyParam, ScopeKey, TypePath};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::collections::BTreeMap;

///
/// Entity
///
/// One discovered injectable type. Created during discovery, immutable
/// thereafter.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Entity {
    pub ty: TypePath,
    pub dependencies: Vec<DependencyParam>,
    pub scope: ScopeKey,
}

///
/// Registry
///
/// The validated, scope-partitioned set of entities for one round. Owned by
/// the round's call stack: dropped wholesale on abort, read-only once the
/// round completes. Scope iteration follows ScopeKey order (Unscoped
/// first); entities are appended in discovery order and sorted by qualified
/// path when the round is finalized, so synthesis output never depends on
/// the host's enumeration order.
///

#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<ScopeKey, Vec<Entity>>,
}

// Scope keys serialize under their display form so the registry can be
// dumped as plain JSON in build logs.
impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (scope, entities) in &self.entries {
            map.serialize_entry(&scope.to_string(), entities)?;
        }
        map.end()
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, entity: Entity) {
        self.entries
            .entry(entity.scope.clone())
            .or_default()
            .push(entity);
    }

    // Sort each scope's entities by qualified path. Called exactly once, on
    // the Scanning -> Completed transition.
    pub(crate) fn finalize(&mut self) {
        for entities in self.entries.values_mut() {
            entities.sort_by(|a, b| a.ty.cmp(&b.ty));
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct scopes.
    #[must_use]
    pub fn scope_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of entities across all scopes.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn entities(&self, scope: &ScopeKey) -> &[Entity] {
        self.entries.get(scope).map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ScopeKey, &[Entity])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }
}
