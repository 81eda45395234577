pub mod types;
pub mod classification;

pub use types::VermatrixError;
pub use classification::ErrorClassification;
