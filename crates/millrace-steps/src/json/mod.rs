// Module definitions for the JSON step family

pub mod read;
pub mod write;

// Re-export the step types
pub use read::*;
pub use write::*;
