pub mod candle;
pub mod data_type;
pub mod entry;
pub mod exit_rule;
pub mod exit_type;
pub mod interval;
pub mod signal;
pub mod trade_result;
pub mod trade_result_builder;
pub mod trade_status;
