pub mod backtester;
pub mod exit_scanner;
pub mod throttle;
