pub mod container_config;
pub mod error;
pub mod sources;

pub use container_config::*;
pub use error::*;
pub use sources::*;
