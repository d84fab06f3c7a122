pub mod candle_source;
pub mod datasource;
pub mod dummy;
pub mod fetcher;
pub mod yahoo;
