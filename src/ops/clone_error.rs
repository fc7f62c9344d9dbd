use thiserror::Error;

/// Error returned when [`Reflect::reflect_clone`](crate::Reflect::reflect_clone)
/// cannot produce a copy of the value.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReflectCloneError {
    /// The type explicitly prohibits cloning.
    #[error("`{type_path}` does not support reflect cloning")]
    NotCloneable { type_path: &'static str },
    /// A field of a composite type could not be cloned.
    #[error("field `{field}` of `{container_type_path}` could not be cloned")]
    FieldNotCloneable {
        field: &'static str,
        container_type_path: &'static str,
    },
}
