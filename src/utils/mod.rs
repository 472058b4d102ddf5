pub mod crypto;
pub mod geo;
pub mod token;
pub mod validation;
