use crate::ViewModel;
use std::any::{TypeId, type_name};

///
/// TypeKey
///
/// Runtime identity of a ViewModel implementation, used to key the provider
/// map consumed by generated factories. Ordered by display name so map
/// iteration stays stable across processes.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TypeKey {
    name: &'static str,
    id: TypeId,
}

impl TypeKey {
    #[must_use]
    pub fn of<T: ViewModel>() -> Self {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    /// Display name of the keyed type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the given instance is of the keyed type.
    #[must_use]
    pub fn is_instance(&self, instance: &dyn ViewModel) -> bool {
        instance.as_any().type_id() == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    struct First;
    struct Second;

    impl ViewModel for First {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl ViewModel for Second {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn key_matches_only_its_own_type() {
        let key = TypeKey::of::<First>();

        assert!(key.is_instance(&First));
        assert!(!key.is_instance(&Second));
    }

    #[test]
    fn keys_for_distinct_types_differ() {
        assert_ne!(TypeKey::of::<First>(), TypeKey::of::<Second>());
    }
}
