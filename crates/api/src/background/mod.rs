//! Background jobs spawned by the server entrypoint.

pub mod retention;
