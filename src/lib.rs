pub mod backtest;
pub mod cli;
pub mod config;
pub mod data_sources;
pub mod models;
pub mod report;
pub mod run_configs;
pub mod signals;
