//! Testing utilities for the Millrace utility steps.
//!
//! This crate provides the in-memory environment fake and the scratch
//! workspace that step tests run against, so tests never have to touch
//! the real process environment or the process-wide property store.

pub mod env;
pub mod workspace;

pub use env::FakeEnv;
pub use workspace::ScratchWorkspace;
