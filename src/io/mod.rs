//! File input: CSV ingest.

pub mod ingest;
