pub mod batch;
pub mod detectors;
pub mod run;
pub mod validate;
