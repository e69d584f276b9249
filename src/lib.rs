//! Client-side orchestration layer of a multi-service payment-gateway
//! administration console.
//!
//! The backend is split across independently deployed services: a front-door
//! gateway, a merchant registry, and a payment processor. This crate decides
//! which address to call and in what order, recovers when the preferred route
//! is unavailable (merchant creation falls back from the gateway to the
//! merchant service on 404/connection-refused), composes per-merchant
//! dashboards from three dependent calls, and normalizes challenge-redirect
//! URLs surfaced during payment creation. It owns no persistent state, caches
//! nothing, and never retries beyond the single documented fallback.

pub mod config;
pub mod error;
pub mod logging;
pub mod merchants;
pub mod models;
pub mod payments;
pub mod providers;
pub mod transport;

pub use config::{ConfigError, ConsoleConfig};
pub use error::{ConsoleError, ConsoleResult};
pub use merchants::MerchantOrchestrator;
pub use models::{
    DashboardView, Merchant, MerchantPatch, MerchantProfile, NewPayment, Payment, PaymentMethod,
    PaymentStatus, ProviderRegistry,
};
pub use payments::{resolve_action_url, PaymentLister, PaymentOrchestrator};
pub use providers::ProviderControl;
pub use transport::{ApiCall, ApiError, Credential, HttpTransport, Transport};

use std::sync::Arc;
use std::time::Duration;

/// Wired-up orchestrators sharing one transport client and one configuration.
pub struct Console {
    pub merchants: MerchantOrchestrator,
    pub payments: Arc<PaymentOrchestrator>,
    pub providers: ProviderControl,
}

impl Console {
    pub fn new(config: ConsoleConfig) -> ConsoleResult<Self> {
        config.validate()?;
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(Duration::from_secs(
            config.request_timeout_secs,
        ))?);
        Self::with_transport(transport, config)
    }

    /// Construct against an explicit transport; the seam tests use to inject
    /// fake backends.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        config: ConsoleConfig,
    ) -> ConsoleResult<Self> {
        let payments = Arc::new(PaymentOrchestrator::new(transport.clone(), config.clone()));
        let merchants =
            MerchantOrchestrator::new(transport.clone(), config.clone(), payments.clone());
        let providers = ProviderControl::new(transport, config);
        Ok(Self {
            merchants,
            payments,
            providers,
        })
    }

    pub fn from_env() -> ConsoleResult<Self> {
        Self::new(ConsoleConfig::from_env()?)
    }
}
