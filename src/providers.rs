//! Mock payment-provider control
//!
//! Pure read/switch against the payment service; no multi-service
//! composition. The current key is always a member of the registry map,
//! and switching to the already-active key is a no-op success. Duplicate
//! in-flight switch requests are the caller's concern, not a network
//! guarantee.

use crate::config::ConsoleConfig;
use crate::error::{decode, ConsoleResult};
use crate::models::ProviderRegistry;
use crate::transport::{ApiCall, Transport};
use std::sync::Arc;
use tracing::info;

pub struct ProviderControl {
    transport: Arc<dyn Transport>,
    config: ConsoleConfig,
}

impl ProviderControl {
    pub fn new(transport: Arc<dyn Transport>, config: ConsoleConfig) -> Self {
        Self { transport, config }
    }

    /// Current provider key and the full registry mapping.
    pub async fn current(&self) -> ConsoleResult<ProviderRegistry> {
        let call = ApiCall::get(&self.config.payment_service_url, "/api/v1/provider");
        decode(self.transport.send(call).await?)
    }

    /// Ask the backend to activate `provider_key`; a rejected key surfaces
    /// as a validation failure with the backend's detail text. Returns the
    /// new current key.
    pub async fn switch_to(&self, provider_key: &str) -> ConsoleResult<String> {
        let call = ApiCall::put(&self.config.payment_service_url, "/api/v1/provider")
            .with_body(serde_json::json!({ "provider": provider_key }));
        let registry: ProviderRegistry = decode(self.transport.send(call).await?)?;
        info!(provider = %registry.current_provider, "active provider switched");
        Ok(registry.current_provider)
    }
}
