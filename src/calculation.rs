pub mod billing;
pub mod classifier;
pub mod formatting;
pub mod pipeline;
pub mod report;
pub mod sorting;
pub mod usage;
