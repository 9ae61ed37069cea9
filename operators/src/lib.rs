pub mod engine;
pub mod error;
pub mod lineage;
pub mod plot;
pub mod processing;
pub mod source;
pub mod util;
