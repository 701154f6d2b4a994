use thiserror::Error as ThisError;

///
/// FactoryError
///
/// Invalid-usage failures raised by generated factory code. These are the
/// generated contract: the factory fails loudly instead of returning a
/// default, and callers see the error unchanged.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum FactoryError {
    #[error("a different implementation was produced than requested")]
    TypeMismatch,

    #[error("requested type is not supported by the factory")]
    UnboundType,
}
