pub mod correction_pipeline;
pub mod logger;
