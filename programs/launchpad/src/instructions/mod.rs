pub mod admin;
pub mod boost;
pub mod claim;
pub mod delegate;
pub mod initialize;
pub mod launch;
pub mod market_cap;
pub mod oracle;
pub mod quote;
pub mod trade;

pub use admin::*;
pub use boost::*;
pub use claim::*;
pub use delegate::*;
pub use initialize::*;
pub use launch::*;
pub use market_cap::*;
pub use oracle::*;
pub use quote::*;
pub use trade::*;
