//! Synthetic data generation.

pub mod sample;

pub use sample::{generate_sample, write_sample_csv, SampleConfig};
