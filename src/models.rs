//! Data model for the administration console
//!
//! Everything here is fetched on demand and held only for the duration of a
//! single operation; the orchestration layer owns no persistent state.
//! Amounts travel as decimal strings end to end so no binary floating-point
//! rounding can occur in transit.

use crate::error::{ConsoleError, ConsoleResult};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Succeeded,
    Failed,
    RequiresAction,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
            PaymentStatus::RequiresAction => "requires_action",
        }
    }

    /// Terminal states of the externally driven lifecycle
    /// (`pending -> processing -> {succeeded, failed}`, with the
    /// `requires_action` branch when a challenge is required).
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Succeeded | PaymentStatus::Failed)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    BankTransfer,
    DigitalWallet,
}

/// Merchant as returned by the merchant service. Credentials are assigned by
/// the owning service; the console only consumes what comes back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Merchant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub api_keys: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Merchant {
    pub fn primary_api_key(&self) -> Option<&str> {
        self.api_keys.first().map(String::as_str)
    }
}

/// Creation payload for a merchant: a display name plus optional branding.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MerchantProfile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl MerchantProfile {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl From<&str> for MerchantProfile {
    fn from(name: &str) -> Self {
        MerchantProfile::named(name)
    }
}

impl From<String> for MerchantProfile {
    fn from(name: String) -> Self {
        MerchantProfile::named(name)
    }
}

/// Partial branding update; absent fields are left untouched by the service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MerchantPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// Caller-side request for a new payment. The method defaults to `card`
/// when omitted.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub amount: String,
    pub currency: String,
    pub description: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

impl NewPayment {
    pub fn new(amount: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
            description: None,
            payment_method: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    /// Reject malformed or non-positive amounts before anything touches the
    /// network.
    pub fn validate(&self) -> ConsoleResult<()> {
        let parsed = BigDecimal::from_str(&self.amount).map_err(|_| {
            ConsoleError::validation(format!("invalid decimal amount: {}", self.amount))
        })?;
        if parsed <= BigDecimal::from(0) {
            return Err(ConsoleError::validation(
                "amount must be greater than zero",
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(ConsoleError::validation("currency is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub payment_id: String,
    pub merchant_id: String,
    #[serde(deserialize_with = "decimal_string")]
    pub amount: String,
    pub currency: String,
    pub status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub requires_action: bool,
    #[serde(default)]
    pub next_action: Option<JsonValue>,
    #[serde(default)]
    pub next_action_url: Option<String>,
    #[serde(default)]
    pub metadata: Option<JsonValue>,
}

/// Accept an amount sent either as a decimal string or a bare JSON number and
/// keep it as its string representation.
fn decimal_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => Ok(s),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected decimal amount, got {}",
            other
        ))),
    }
}

/// Current mock-provider selection of the payment service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderRegistry {
    pub current_provider: String,
    pub available_providers: BTreeMap<String, String>,
    #[serde(default)]
    pub environment: Option<String>,
}

impl ProviderRegistry {
    pub fn contains(&self, key: &str) -> bool {
        self.available_providers.contains_key(key)
    }
}

/// Aggregated per-merchant view: one merchant, that merchant's payments in
/// service order, and the opaque rendered-dashboard payload. Constructed
/// fresh on every request and never cached.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub merchant: Merchant,
    pub payments: Vec<Payment>,
    pub rendered: String,
}
