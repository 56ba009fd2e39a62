//! Application services: the sentinel, its shared state and the keeper loop.

pub mod keeper;
pub mod sentinel;
pub mod state;
