//! Infrastructure configuration modules.

pub mod logging;
pub mod paper;
pub mod sentinel;
pub mod settings;
