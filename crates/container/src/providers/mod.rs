pub mod provider;
pub mod registry;

pub use provider::*;
pub use registry::*;
