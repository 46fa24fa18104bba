//! Configuration: process settings from the environment and live floor settings.

pub mod env;
pub mod settings;

pub use env::*;
pub use settings::*;
