//! Merchant orchestration
//!
//! Merchant creation walks an explicit ordered list of candidate endpoints
//! (gateway first, merchant service direct second) and advances only on a
//! routing miss, so the fallback can never double-submit after a
//! non-routing failure. The dashboard is a strict three-step composition;
//! the first failing step aborts the whole operation and no partial view is
//! ever returned.

use crate::config::ConsoleConfig;
use crate::error::{decode, ConsoleError, ConsoleResult};
use crate::models::{DashboardView, Merchant, MerchantPatch, MerchantProfile};
use crate::payments::PaymentLister;
use crate::transport::{ApiCall, Credential, Transport};
use std::sync::Arc;
use tracing::{info, warn};

pub struct MerchantOrchestrator {
    transport: Arc<dyn Transport>,
    config: ConsoleConfig,
    payments: Arc<dyn PaymentLister>,
}

impl MerchantOrchestrator {
    pub fn new(
        transport: Arc<dyn Transport>,
        config: ConsoleConfig,
        payments: Arc<dyn PaymentLister>,
    ) -> Self {
        Self {
            transport,
            config,
            payments,
        }
    }

    /// Create a merchant from a bare display name or a full profile.
    ///
    /// The call is attempted against each candidate base in order; a 404 or
    /// connection-refused moves on to the next candidate, any other failure
    /// propagates immediately. At most one creation succeeds per invocation.
    /// The returned merchant carries its service-assigned credentials.
    pub async fn create(&self, profile: impl Into<MerchantProfile>) -> ConsoleResult<Merchant> {
        let profile = profile.into();
        if profile.name.trim().is_empty() {
            return Err(ConsoleError::validation("merchant name is required"));
        }
        let body = serde_json::to_value(&profile).map_err(|e| ConsoleError::Transport {
            status: None,
            message: format!("failed to encode merchant profile: {}", e),
        })?;

        let mut last_miss = None;
        for base in self.config.merchant_create_candidates() {
            let call = ApiCall::post(base, "/api/v1/merchants").with_body(body.clone());
            match self.transport.send(call).await {
                Ok(value) => {
                    let merchant: Merchant = decode(value)?;
                    info!(merchant_id = %merchant.id, base = %base, "merchant created");
                    return Ok(merchant);
                }
                Err(err) if err.is_routing_miss() => {
                    warn!(base = %base, error = %err, "merchant create missed route, trying next candidate");
                    last_miss = Some(err);
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(last_miss
            .map(ConsoleError::from)
            .unwrap_or(ConsoleError::Routing {
                message: "no candidate endpoints configured".to_string(),
            }))
    }

    /// The merchant owning `credential`, or `NotFound` when the key is
    /// unrecognized.
    pub async fn resolve_self(&self, credential: &Credential) -> ConsoleResult<Merchant> {
        let call = ApiCall::get(&self.config.merchant_service_url, "/api/v1/merchants/me")
            .with_credential(credential.clone());
        decode(self.transport.send(call).await?)
    }

    /// Aggregated dashboard for the calling merchant: rendered payload, then
    /// merchant resolution, then that merchant's payments. Each step needs
    /// the previous one's output, so the pipeline is strictly sequential.
    pub async fn dashboard(&self, credential: &Credential) -> ConsoleResult<DashboardView> {
        let call = ApiCall::get(&self.config.merchant_service_url, "/api/v1/dashboard")
            .with_credential(credential.clone());
        let rendered = self.transport.send_text(call).await?;

        let merchant = self.resolve_self(credential).await?;

        let payments = self.payments.list_by_merchant(&merchant.id).await?;

        Ok(DashboardView {
            merchant,
            payments,
            rendered,
        })
    }

    /// Every registered merchant, as returned by the service. No pagination.
    pub async fn list_all(&self) -> ConsoleResult<Vec<Merchant>> {
        let call = ApiCall::get(&self.config.merchant_service_url, "/api/v1/merchants/all");
        decode(self.transport.send(call).await?)
    }

    /// Apply a partial branding patch to the calling merchant.
    pub async fn update(
        &self,
        credential: &Credential,
        patch: MerchantPatch,
    ) -> ConsoleResult<Merchant> {
        let body = serde_json::to_value(&patch).map_err(|e| ConsoleError::Transport {
            status: None,
            message: format!("failed to encode merchant patch: {}", e),
        })?;
        let call = ApiCall::patch(&self.config.merchant_service_url, "/api/v1/merchants/me")
            .with_credential(credential.clone())
            .with_body(body);
        let merchant: Merchant = decode(self.transport.send(call).await?)?;
        info!(merchant_id = %merchant.id, "merchant updated");
        Ok(merchant)
    }
}
