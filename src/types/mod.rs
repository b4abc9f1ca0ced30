pub mod error;
pub mod form;
pub mod id;
pub mod sensitive;
pub mod validation;

pub use error::Error;
pub use sensitive::Sensitive;
