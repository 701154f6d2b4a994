pub mod artifact;
pub mod factory;
pub mod factory_module;
pub mod module;
pub mod naming;
pub mod render;
pub mod sink;

use crate::artifact::ArtifactError;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        artifact::{Artifact, ArtifactError, ArtifactKind},
        naming,
        render::{render, render_source},
        sink::{ArtifactSink, Conflict},
    };
    pub use vminject_schema::prelude::*;
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    ArtifactError(#[from] ArtifactError),
}
