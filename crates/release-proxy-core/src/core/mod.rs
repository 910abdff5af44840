pub mod error;
pub mod reference;
