use crate::config::Config;
use serde::Serialize;
use thiserror::Error as ThisError;
use vminject_build::{
    artifact::{Artifact, ArtifactError},
    factory, factory_module, module,
    sink::ArtifactSink,
};
use vminject_schema::{
    discover::{DiscoverError, Discovery, RoundOutcome},
    report::{Diagnostic, Reporter},
    symtab::SymbolTable,
    types::TypePath,
};

///
/// RoundError
///
/// Unrecoverable failures of one generation round. The host fixes the
/// input and re-drives the round from scratch; no partial artifact set is
/// ever emitted.
///

#[derive(Debug, ThisError)]
pub enum RoundError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Discover(#[from] DiscoverError),
}

///
/// RoundSummary
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RoundSummary {
    /// Scopes that produced artifacts.
    pub scopes: usize,
    /// Artifacts accepted by the sink.
    pub written: usize,
    /// Artifacts the sink rejected; siblings stay written.
    pub conflicts: usize,
}

/// Drive one generation round: discovery over the candidate set, then per
/// scope the factory, binding-module, and factory-module artifacts, each
/// verified and written to the sink.
pub fn run_round(
    symtab: &dyn SymbolTable,
    candidates: &[TypePath],
    config: &Config,
    sink: &mut dyn ArtifactSink,
    reporter: &dyn Reporter,
) -> Result<RoundSummary, RoundError> {
    let registry = match Discovery::new(symtab, reporter).process(candidates)? {
        RoundOutcome::Completed(registry) => registry,
        RoundOutcome::Skipped => {
            reporter.report(Diagnostic::note(
                "no injectable entities discovered; nothing to generate",
            ));
            return Ok(RoundSummary::default());
        }
    };

    let mut summary = RoundSummary::default();

    for (scope, entities) in registry.iter() {
        let factory = factory::synthesize(scope, entities, config.factory_name.as_ref());
        let module = module::synthesize(scope, entities);
        let factory_module = factory_module::synthesize(scope, &factory.name);

        for entity in entities {
            reporter.report(Diagnostic::note(format!(
                "{} added to {}",
                entity.ty, module.name
            )));
        }

        for artifact in [factory, module, factory_module] {
            write(&artifact, sink, reporter, &mut summary)?;
        }

        summary.scopes += 1;
    }

    Ok(summary)
}

// Verify before the sink renders anything; conflicts are reported and do
// not invalidate sibling artifacts.
fn write(
    artifact: &Artifact,
    sink: &mut dyn ArtifactSink,
    reporter: &dyn Reporter,
    summary: &mut RoundSummary,
) -> Result<(), RoundError> {
    artifact.verify()?;

    match sink.write(artifact) {
        Ok(()) => {
            summary.written += 1;
            reporter.report(Diagnostic::note(format!("{} was created", artifact.name)));
        }
        Err(conflict) => {
            summary.conflicts += 1;
            reporter.report(Diagnostic::error(conflict.to_string()));
        }
    }

    Ok(())
}
