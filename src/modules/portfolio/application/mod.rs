pub mod auto_refresh;
pub mod change_feed;
pub mod connection_monitor;
pub mod fallback_cache;
pub mod live_portfolio;
pub mod portfolio_reader;
