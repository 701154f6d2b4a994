use crate::{
    registry::{Entity, Registry},
    report::{Diagnostic, Reporter},
    symtab::{Capability, ConstructorDescriptor, ScopeValue, SymbolTable},
    types::{ScopeKey, TypePath},
    well_known,
};
use thiserror::Error as ThisError;

///
/// DiscoverError
///
/// Structural failures. Any one of them aborts the whole round: the
/// registry built so far is dropped and nothing is handed to synthesis.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum DiscoverError {
    #[error("scope '{tag}' on class {entity} is not marked as a scope")]
    InvalidScopeMarker { entity: TypePath, tag: TypePath },

    #[error("base type {base} was not found in the symbol table")]
    MissingBaseType { base: TypePath },

    #[error("class {entity} has more than one constructor marked for assisted injection")]
    MultipleMarkedConstructors { entity: TypePath },

    #[error("class {entity} is not assignable to {base}")]
    NotASubtype { entity: TypePath, base: TypePath },
}

///
/// RoundOutcome
///
/// Terminal states of one discovery round.
///

#[derive(Debug)]
pub enum RoundOutcome {
    /// At least one entity was discovered; the registry is final.
    Completed(Registry),
    /// A clean scan found no marked constructors; nothing to generate.
    Skipped,
}

///
/// Discovery
///
/// Scans one round's candidate types for the injectable-entity marker and
/// builds the registry. Scanning is sequential: the first validation
/// failure short-circuits the rest of the scan.
///

pub struct Discovery<'a> {
    symtab: &'a dyn SymbolTable,
    reporter: &'a dyn Reporter,
}

impl<'a> Discovery<'a> {
    #[must_use]
    pub const fn new(symtab: &'a dyn SymbolTable, reporter: &'a dyn Reporter) -> Self {
        Self { symtab, reporter }
    }

    pub fn process(&self, candidates: &[TypePath]) -> Result<RoundOutcome, DiscoverError> {
        let base_path = well_known::path(well_known::VIEW_MODEL);
        let base = self
            .symtab
            .resolve(&base_path)
            .ok_or_else(|| self.abort(DiscoverError::MissingBaseType { base: base_path }))?;

        let mut registry = Registry::new();

        for candidate in candidates {
            let mut constructors = self.symtab.marked_constructors(candidate);

            let constructor = match constructors.len() {
                0 => continue,
                1 => constructors.remove(0),
                _ => {
                    return Err(self.abort(DiscoverError::MultipleMarkedConstructors {
                        entity: candidate.clone(),
                    }));
                }
            };

            let entity = self.validate(candidate, &base, constructor)?;
            registry.insert(entity);
        }

        if registry.is_empty() {
            return Ok(RoundOutcome::Skipped);
        }

        registry.finalize();
        Ok(RoundOutcome::Completed(registry))
    }

    fn validate(
        &self,
        candidate: &TypePath,
        base: &TypePath,
        constructor: ConstructorDescriptor,
    ) -> Result<Entity, DiscoverError> {
        let scope = self.validate_scope(candidate, constructor.scope.as_ref())?;

        if !self.symtab.is_subtype(candidate, base) {
            return Err(self.abort(DiscoverError::NotASubtype {
                entity: candidate.clone(),
                base: base.clone(),
            }));
        }

        Ok(Entity {
            ty: candidate.clone(),
            dependencies: constructor.params,
            scope,
        })
    }

    // No value means the unscoped group; otherwise the tag must resolve to
    // a declared type carrying the Scope capability.
    fn validate_scope(
        &self,
        candidate: &TypePath,
        value: Option<&ScopeValue>,
    ) -> Result<ScopeKey, DiscoverError> {
        let Some(value) = value else {
            return Ok(ScopeKey::Unscoped);
        };

        let invalid = || {
            self.abort(DiscoverError::InvalidScopeMarker {
                entity: candidate.clone(),
                tag: value.raw().clone(),
            })
        };

        let tag = self
            .symtab
            .resolve_annotation_value(value)
            .ok_or_else(invalid)?;
        if !self.symtab.has_capability(&tag, Capability::Scope) {
            return Err(invalid());
        }

        Ok(ScopeKey::Scoped(tag))
    }

    // Every abort also surfaces on the diagnostics channel before the error
    // propagates.
    fn abort(&self, err: DiscoverError) -> DiscoverError {
        self.reporter.report(Diagnostic::error(err.to_string()));
        err
    }
}
