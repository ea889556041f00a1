//! Helper macros shared by the value modules.

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

#[macro_export]
/// Helper macro to compose `From` implementations.
macro_rules! compose_from {
    ($to:ty, $mid:ty, $from:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self { Self::from(<$mid>::from(f)) }
        }
    };
}

/// Pulls a human-readable message out of a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}
