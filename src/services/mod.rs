pub mod encoding;
pub mod pipeline;
pub mod qa;
pub mod translation_memory;
