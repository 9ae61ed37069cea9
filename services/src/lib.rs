pub mod cli;
pub mod config;
pub mod error;
pub mod layers;
pub mod logging;
pub mod queries;
pub mod session;
pub mod symbology;
pub mod util;
pub mod workflows;
