pub mod discover;
pub mod registry;
pub mod report;
pub mod symtab;
pub mod types;
pub mod well_known;

use crate::{discover::DiscoverError, types::TypePathError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        discover::{Discovery, RoundOutcome},
        registry::{Entity, Registry},
        report::{Diagnostic, Reporter, Severity},
        symtab::{Capability, ConstructorDescriptor, ScopeValue, SymbolTable},
        types::{DependencyParam, ScopeKey, TypePath},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    DiscoverError(#[from] DiscoverError),

    #[error(transparent)]
    TypePathError(#[from] TypePathError),
}
