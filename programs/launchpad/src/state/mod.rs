pub mod config;
pub mod launch;
pub mod lock;
pub mod oracle;
pub mod pair;
pub mod pool;

pub use config::*;
pub use launch::*;
pub use lock::*;
pub use oracle::*;
pub use pair::*;
pub use pool::*;
