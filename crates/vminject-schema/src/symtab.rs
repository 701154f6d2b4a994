use crate::types::{DependencyParam, TypePath};
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// Capability
///
/// Markers the symbol table can be queried for on a resolved type.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
pub enum Capability {
    /// The type is usable as a scope tag.
    Scope,
}

///
/// ScopeValue
///
/// Opaque annotation-argument token naming a scope type. The raw path is
/// not trusted until the symbol table resolves it.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ScopeValue(TypePath);

impl ScopeValue {
    #[must_use]
    pub const fn new(raw: TypePath) -> Self {
        Self(raw)
    }

    /// The unresolved path as written at the marker site.
    #[must_use]
    pub const fn raw(&self) -> &TypePath {
        &self.0
    }
}

///
/// ConstructorDescriptor
///
/// Facts about one marked constructor: its parameter list in declared
/// order and the optional scope argument of the marker.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ConstructorDescriptor {
    pub params: Vec<DependencyParam>,
    pub scope: Option<ScopeValue>,
}

impl ConstructorDescriptor {
    #[must_use]
    pub const fn new(params: Vec<DependencyParam>, scope: Option<ScopeValue>) -> Self {
        Self { params, scope }
    }
}

///
/// SymbolTable
///
/// Read-only window onto the host's symbol resolution. The pipeline gathers
/// all facts it needs through these queries once per round; it never mutates
/// the table.
///

pub trait SymbolTable {
    /// Canonical identity of a declared type, or None if unknown.
    fn resolve(&self, path: &TypePath) -> Option<TypePath>;

    /// All constructors of `ty` carrying the injectable-entity marker.
    fn marked_constructors(&self, ty: &TypePath) -> Vec<ConstructorDescriptor>;

    fn is_subtype(&self, ty: &TypePath, base: &TypePath) -> bool;

    fn has_capability(&self, ty: &TypePath, capability: Capability) -> bool;

    /// Resolve a marker argument to the type it names, or None if it does
    /// not name a declared type.
    fn resolve_annotation_value(&self, value: &ScopeValue) -> Option<TypePath>;
}
