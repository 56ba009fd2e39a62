//! Inbound ports (driving side): types exchanged with callers of the sentinel.

pub mod sentinel;
