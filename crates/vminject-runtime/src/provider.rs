use crate::{TypeKey, ViewModel};
use std::collections::BTreeMap;

///
/// Provider
///
/// Lazily constructs one ViewModel instance per call. The container builds
/// one provider per binding declared by a generated module.
///

pub struct Provider(Box<dyn Fn() -> Box<dyn ViewModel> + Send + Sync>);

impl Provider {
    pub fn new<F>(produce: F) -> Self
    where
        F: Fn() -> Box<dyn ViewModel> + Send + Sync + 'static,
    {
        Self(Box::new(produce))
    }

    #[must_use]
    pub fn get(&self) -> Box<dyn ViewModel> {
        (self.0)()
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Provider(..)")
    }
}

///
/// ProviderMap
///
/// The multi-binding collection populated by generated modules and read by
/// generated factories.
///

pub type ProviderMap = BTreeMap<TypeKey, Provider>;
