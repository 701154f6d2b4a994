//! Runtime half of the vminject contract.
//!
//! Generated factories and binding modules reference these types by
//! qualified path; nothing in this crate is used by the generator pipeline
//! itself at build time.

mod error;
mod key;
mod provider;

pub use error::FactoryError;
pub use key::TypeKey;
pub use provider::{Provider, ProviderMap};

use std::any::Any;

///
/// ViewModel
///
/// Base capability every injectable entity must implement.
///

pub trait ViewModel: Any {
    fn as_any(&self) -> &dyn Any;
}

///
/// ViewModelFactory
///
/// The container-facing factory capability implemented by every generated
/// factory artifact: resolve a requested type key to a constructed instance.
///

pub trait ViewModelFactory {
    fn create(&self, requested: &TypeKey) -> Result<Box<dyn ViewModel>, FactoryError>;
}
