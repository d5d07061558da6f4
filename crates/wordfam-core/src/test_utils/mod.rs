// Fakes for the source, lexicon and embedding seams
pub mod fakes;

pub use fakes::*;
