//! Payment orchestration
//!
//! Payment creation is a two-step sequence: the caller's credential is first
//! resolved to a merchant id at the merchant service, then the payment is
//! submitted to the gateway. Both steps are strictly sequential; the second
//! cannot start without the value produced by the first. Status transitions
//! are driven by the payment service and only observed here via refetch.

use crate::config::ConsoleConfig;
use crate::error::{decode, ConsoleResult};
use crate::models::{Merchant, NewPayment, Payment};
use crate::transport::{ApiCall, Credential, Transport};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

/// Listing-by-merchant seam consumed by the dashboard composition.
#[async_trait]
pub trait PaymentLister: Send + Sync {
    async fn list_by_merchant(&self, merchant_id: &str) -> ConsoleResult<Vec<Payment>>;
}

pub struct PaymentOrchestrator {
    transport: Arc<dyn Transport>,
    config: ConsoleConfig,
}

impl PaymentOrchestrator {
    pub fn new(transport: Arc<dyn Transport>, config: ConsoleConfig) -> Self {
        Self { transport, config }
    }

    /// Create a payment on behalf of the merchant owning `credential`.
    ///
    /// The amount is submitted as its decimal string representation; the
    /// payment method defaults to `card`. When the response requires an
    /// out-of-band challenge, `next_action_url` is normalized against the
    /// gateway base; directing the payer there is the caller's job.
    pub async fn create(
        &self,
        credential: &Credential,
        request: NewPayment,
    ) -> ConsoleResult<Payment> {
        request.validate()?;

        let merchant_id = self.resolve_merchant_id(credential).await?;

        let body = serde_json::json!({
            "merchant_id": merchant_id,
            "amount": request.amount,
            "currency": request.currency,
            "description": request.description,
            "payment_method": request.payment_method.unwrap_or_default(),
        });
        let call = ApiCall::post(&self.config.gateway_url, "/v1/payments")
            .with_credential(credential.clone())
            .with_body(body);

        let mut payment: Payment = decode(self.transport.send(call).await?)?;
        self.normalize_action_url(&mut payment);
        info!(
            payment_id = %payment.payment_id,
            status = %payment.status,
            requires_action = payment.requires_action,
            "payment created"
        );
        Ok(payment)
    }

    /// Payments whose creation date falls within `[date_from, date_to]`
    /// inclusive, calendar-date granularity. Filtering happens server-side
    /// and the result is returned verbatim.
    pub async fn list_for_range(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> ConsoleResult<Vec<Payment>> {
        let path = format!(
            "/api/v1/payments/all?date_from={}&date_to={}",
            date_from.format("%Y-%m-%d"),
            date_to.format("%Y-%m-%d"),
        );
        let call = ApiCall::get(&self.config.payment_service_url, path);
        decode(self.transport.send(call).await?)
    }

    /// Every payment belonging to one merchant, in service order.
    pub async fn payments_for_merchant(&self, merchant_id: &str) -> ConsoleResult<Vec<Payment>> {
        let call = ApiCall::get(
            &self.config.payment_service_url,
            format!("/api/v1/payments/by-merchant/{}", merchant_id),
        );
        decode(self.transport.send(call).await?)
    }

    /// Refetch a single payment from the gateway to observe its current
    /// status.
    pub async fn get(&self, credential: &Credential, payment_id: &str) -> ConsoleResult<Payment> {
        let call = ApiCall::get(
            &self.config.gateway_url,
            format!("/v1/payments/{}", payment_id),
        )
        .with_credential(credential.clone());
        let mut payment: Payment = decode(self.transport.send(call).await?)?;
        self.normalize_action_url(&mut payment);
        Ok(payment)
    }

    async fn resolve_merchant_id(&self, credential: &Credential) -> ConsoleResult<String> {
        let call = ApiCall::get(&self.config.merchant_service_url, "/api/v1/merchants/me")
            .with_credential(credential.clone());
        let merchant: Merchant = decode(self.transport.send(call).await?)?;
        Ok(merchant.id)
    }

    fn normalize_action_url(&self, payment: &mut Payment) {
        if let Some(url) = payment.next_action_url.take() {
            payment.next_action_url = Some(resolve_action_url(&self.config.gateway_url, &url));
        }
        if payment.requires_action && payment.next_action_url.is_none() {
            // Backend invariant miss: the challenge cannot be completed
            // without a redirect target.
            warn!(
                payment_id = %payment.payment_id,
                "payment requires action but carries no challenge URL"
            );
        }
    }
}

#[async_trait]
impl PaymentLister for PaymentOrchestrator {
    async fn list_by_merchant(&self, merchant_id: &str) -> ConsoleResult<Vec<Payment>> {
        self.payments_for_merchant(merchant_id).await
    }
}

/// Normalize a backend-supplied URL for presentation to a human operator:
/// absolute URLs pass through unchanged, root-relative ones are prefixed with
/// the configured gateway base.
pub fn resolve_action_url(gateway_base: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("{}{}", gateway_base.trim_end_matches('/'), url)
    }
}
