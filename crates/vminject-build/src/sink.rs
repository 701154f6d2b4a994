use crate::artifact::Artifact;
use thiserror::Error as ThisError;
use vminject_schema::types::TypePath;

///
/// Conflict
///
/// A sink-side write failure, e.g. the artifact name already exists.
/// Reported per artifact; siblings already written stay written.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("artifact {name} was not written: {reason}")]
pub struct Conflict {
    pub name: TypePath,
    pub reason: String,
}

impl Conflict {
    pub fn new(name: TypePath, reason: impl Into<String>) -> Self {
        Self {
            name,
            reason: reason.into(),
        }
    }
}

///
/// ArtifactSink
///
/// Persists synthesized artifacts. The pipeline only calls this after a
/// round completes; partially-built rounds never reach the sink.
///

pub trait ArtifactSink {
    fn write(&mut self, artifact: &Artifact) -> Result<(), Conflict>;
}
