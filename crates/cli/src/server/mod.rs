mod supervisor;

pub use supervisor::run_pipeline;
