pub mod config;
pub mod error;
pub mod http;
pub mod receipt;
pub mod scoring;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use receipt::{Item, Receipt, ScoreResult};
pub use scoring::evaluate;
pub use store::PointsStore;
