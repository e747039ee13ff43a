//! API clients for stock data providers

pub mod yahoo;

pub use yahoo::YahooFinanceClient;
