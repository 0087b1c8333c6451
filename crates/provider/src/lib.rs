pub mod error;
pub mod provider;

pub use error::ProviderError;
pub use provider::{DynProvider, Provider};
