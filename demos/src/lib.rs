//! Shared setup for the runnable hearth demos.

pub mod common;
