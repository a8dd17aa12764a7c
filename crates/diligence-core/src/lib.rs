//! Domain model and pure logic for due-diligence analysis of pitch-call
//! transcripts: the transcript normalizer, the typed verdicts each analysis
//! procedure produces, the fixed instruction profiles, and the acceptance
//! rule. This crate performs no I/O; the engine crate drives it.

pub mod error;
pub mod model;
pub mod profile;
pub mod transcript;
pub mod validate;

pub use error::*;
pub use model::*;
pub use profile::*;
pub use transcript::*;
