// Domain types and value objects
pub mod bar_query;
pub mod market_state;
pub mod zones;

// Re-export commonly used types
pub use bar_query::BarQuery;
pub use market_state::MarketState;
pub use zones::Zones;
