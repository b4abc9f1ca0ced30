/// Prevents foreign crates from implementing traits that are meant
/// to be closed, such as [`Marker`](crate::types::id::marker::Marker).
pub trait Sealed {}
