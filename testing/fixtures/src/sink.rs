use vminject_build::{
    artifact::Artifact,
    render::render_source,
    sink::{ArtifactSink, Conflict},
};
use vminject_schema::types::TypePath;
use std::collections::BTreeSet;

///
/// WrittenArtifact
///
/// An artifact the sink accepted, together with its rendered source.
///

#[derive(Clone, Debug)]
pub struct WrittenArtifact {
    pub artifact: Artifact,
    pub source: String,
}

///
/// MemorySink
///
/// Collects written artifacts. Rendering happens here, at the sink
/// boundary; a second artifact under an already-written name conflicts,
/// mirroring a filer that refuses to overwrite.
///

#[derive(Debug, Default)]
pub struct MemorySink {
    written: Vec<WrittenArtifact>,
    names: BTreeSet<TypePath>,
    rejected: BTreeSet<TypePath>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a conflict for the given artifact name.
    pub fn reject(&mut self, name: TypePath) -> &mut Self {
        self.rejected.insert(name);
        self
    }

    #[must_use]
    pub fn written(&self) -> &[WrittenArtifact] {
        &self.written
    }

    #[must_use]
    pub fn find(&self, name: &TypePath) -> Option<&WrittenArtifact> {
        self.written.iter().find(|w| &w.artifact.name == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.written
            .iter()
            .map(|w| w.artifact.name.to_string())
            .collect()
    }
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, artifact: &Artifact) -> Result<(), Conflict> {
        if self.rejected.contains(&artifact.name) {
            return Err(Conflict::new(artifact.name.clone(), "rejected by the host"));
        }
        if self.names.contains(&artifact.name) {
            return Err(Conflict::new(artifact.name.clone(), "name already exists"));
        }

        let source = render_source(artifact)
            .map_err(|err| Conflict::new(artifact.name.clone(), err.to_string()))?;
        self.names.insert(artifact.name.clone());
        self.written.push(WrittenArtifact {
            artifact: artifact.clone(),
            source,
        });

        Ok(())
    }
}
