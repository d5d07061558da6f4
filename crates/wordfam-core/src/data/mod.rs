pub mod errors;

pub use errors::{FamilyError, FamilyResult};
