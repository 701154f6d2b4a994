use vminject_schema::{
    symtab::{Capability, ConstructorDescriptor, ScopeValue, SymbolTable},
    types::{DependencyParam, TypePath},
    well_known,
};
use std::collections::{BTreeMap, BTreeSet};

///
/// MemorySymbolTable
///
/// A declared-type universe for tests. The base injectable capability is
/// registered up front, mirroring a host where the container runtime is
/// always on the classpath.
///

#[derive(Debug, Default)]
pub struct MemorySymbolTable {
    types: BTreeSet<TypePath>,
    supertypes: BTreeMap<TypePath, BTreeSet<TypePath>>,
    capabilities: BTreeMap<TypePath, BTreeSet<Capability>>,
    constructors: BTreeMap<TypePath, Vec<ConstructorDescriptor>>,
}

impl MemorySymbolTable {
    #[must_use]
    pub fn new() -> Self {
        let mut table = Self::default();
        table.declare(&well_known::path(well_known::VIEW_MODEL));
        table
    }

    /// A universe without the base capability registered.
    #[must_use]
    pub fn without_base() -> Self {
        Self::default()
    }

    /// Declare a plain type.
    pub fn declare(&mut self, ty: &TypePath) -> &mut Self {
        self.types.insert(ty.clone());
        self
    }

    /// Declare a type extending the base injectable capability.
    pub fn declare_view_model(&mut self, ty: &TypePath) -> &mut Self {
        self.declare(ty);
        self.supertypes
            .entry(ty.clone())
            .or_default()
            .insert(well_known::path(well_known::VIEW_MODEL));
        self
    }

    /// Declare a type carrying the Scope capability.
    pub fn declare_scope(&mut self, ty: &TypePath) -> &mut Self {
        self.declare(ty);
        self.capabilities
            .entry(ty.clone())
            .or_default()
            .insert(Capability::Scope);
        self
    }

    /// Mark one constructor of `ty` for assisted injection.
    pub fn mark_constructor(
        &mut self,
        ty: &TypePath,
        params: Vec<DependencyParam>,
        scope: Option<&TypePath>,
    ) -> &mut Self {
        self.constructors
            .entry(ty.clone())
            .or_default()
            .push(ConstructorDescriptor::new(
                params,
                scope.map(|tag| ScopeValue::new(tag.clone())),
            ));
        self
    }
}

impl SymbolTable for MemorySymbolTable {
    fn resolve(&self, path: &TypePath) -> Option<TypePath> {
        self.types.get(path).cloned()
    }

    fn marked_constructors(&self, ty: &TypePath) -> Vec<ConstructorDescriptor> {
        self.constructors.get(ty).cloned().unwrap_or_default()
    }

    fn is_subtype(&self, ty: &TypePath, base: &TypePath) -> bool {
        if ty == base {
            return true;
        }
        self.supertypes
            .get(ty)
            .is_some_and(|supers| supers.contains(base))
    }

    fn has_capability(&self, ty: &TypePath, capability: Capability) -> bool {
        self.capabilities
            .get(ty)
            .is_some_and(|caps| caps.contains(&capability))
    }

    fn resolve_annotation_value(&self, value: &ScopeValue) -> Option<TypePath> {
        self.types.get(value.raw()).cloned()
    }
}
