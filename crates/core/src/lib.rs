pub mod parameters;
pub mod result;

pub use parameters::MessageParameters;
pub use result::NotificationResult;
