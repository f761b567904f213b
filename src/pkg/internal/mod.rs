pub mod adaptors;
pub mod ai;
pub mod classifier;
pub mod pipeline;
