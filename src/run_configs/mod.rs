pub mod backtest_file;
