pub mod normalizer;
pub mod signal_summary;
