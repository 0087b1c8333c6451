use async_trait::async_trait;
use herald_core::{MessageParameters, NotificationResult};

use crate::error::ProviderError;

/// Strongly-typed provider trait with native `async fn`.
///
/// A provider translates the generic [`MessageParameters`] bag into one
/// delivery channel's API call and reports the outcome as a
/// [`NotificationResult`]. The façade routes to a provider by its
/// [`name`](Self::name).
///
/// This trait is **not** object-safe because it uses native `async fn` methods
/// (which desugar to opaque `impl Future` return types). If you need dynamic
/// dispatch, use [`DynProvider`] instead -- every `Provider` automatically
/// implements `DynProvider` via a blanket implementation.
pub trait Provider: Send + Sync {
    /// Returns the unique, lowercase routing name of this provider.
    fn name(&self) -> &str;

    /// Send the message described by `parameters`.
    ///
    /// Rejections and missing data come back as a failed
    /// [`NotificationResult`]; the `Err` channel is reserved for faults where
    /// the delivery channel produced no answer at all.
    fn send(
        &self,
        parameters: &MessageParameters,
    ) -> impl std::future::Future<Output = Result<NotificationResult, ProviderError>> + Send;

    /// Perform a health check to verify the provider is operational.
    fn health_check(&self) -> impl std::future::Future<Output = Result<(), ProviderError>> + Send;
}

/// Object-safe provider trait for use behind `Arc<dyn DynProvider>`.
///
/// Uses [`macro@async_trait`] to enable dynamic dispatch of async methods.
/// You generally should not implement this trait directly -- instead implement
/// [`Provider`] and rely on the blanket implementation.
#[async_trait]
pub trait DynProvider: Send + Sync {
    /// Returns the unique, lowercase routing name of this provider.
    fn name(&self) -> &str;

    /// Send the message described by `parameters`.
    async fn send(&self, parameters: &MessageParameters)
    -> Result<NotificationResult, ProviderError>;

    /// Perform a health check to verify the provider is operational.
    async fn health_check(&self) -> Result<(), ProviderError>;
}

/// Blanket implementation: any type that implements [`Provider`] also
/// implements [`DynProvider`], bridging the static and dynamic dispatch worlds.
#[async_trait]
impl<T: Provider + Sync> DynProvider for T {
    fn name(&self) -> &str {
        Provider::name(self)
    }

    async fn send(
        &self,
        parameters: &MessageParameters,
    ) -> Result<NotificationResult, ProviderError> {
        Provider::send(self, parameters).await
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Provider::health_check(self).await
    }
}
