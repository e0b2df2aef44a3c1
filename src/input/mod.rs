//! Input processing module
//! Handles dataset format detection, parsing and loading

pub mod dataset;
pub mod file_detector;
pub mod manager;

pub use dataset::Dataset;
pub use manager::DatasetLoader;
