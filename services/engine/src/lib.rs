pub mod error;
pub mod settlement;
pub mod store;
pub mod types;

pub use error::EngineError;
