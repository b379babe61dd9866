//! Checkout flow
//!
//! Paying the application fee and recording the application, in order:
//! validate the form locally, create a payment intent through the backend,
//! confirm it with the hosted payment provider, then submit the application
//! carrying the receipt's transaction id. A failure at any step leaves no
//! partial application record behind. With no payment key configured the
//! flow fails before any network call.

use async_trait::async_trait;
use std::sync::Arc;

use crate::client::{ApiClient, ApiError};
use crate::config::PaymentConfig;
use crate::models::{
    Application, CheckoutSummary, CreateApplicationInput, PaymentReceipt, Scholarship,
};
use crate::services::validate::{validate_application, ValidationError};

/// Error types for payment confirmation
#[derive(Debug, Clone, thiserror::Error)]
pub enum PaymentError {
    /// No payment public key in configuration
    #[error("Payments are not configured")]
    NotConfigured,

    /// The provider declined the card/payment; message surfaced verbatim
    #[error("{0}")]
    Declined(String),

    /// The provider could not be reached
    #[error("Payment provider failed: {0}")]
    Provider(String),
}

/// Everything that can stop a checkout.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The hosted payment provider, behind its SDK's call shape. The embedding
/// application binds this to its SDK; tests script it.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Present a client secret for confirmation and collect the receipt.
    async fn confirm(&self, client_secret: &str) -> Result<PaymentReceipt, PaymentError>;
}

/// Checkout flow over the backend and the payment provider.
pub struct Checkout {
    api: Arc<ApiClient>,
    provider: Arc<dyn PaymentProvider>,
    public_key: Option<String>,
}

impl Checkout {
    pub fn new(
        api: Arc<ApiClient>,
        provider: Arc<dyn PaymentProvider>,
        config: &PaymentConfig,
    ) -> Self {
        Self {
            api,
            provider,
            public_key: config.public_key.clone(),
        }
    }

    /// The amounts the checkout screen presents for a scholarship.
    pub fn summary(scholarship: &Scholarship) -> CheckoutSummary {
        CheckoutSummary::new(scholarship.application_fees, scholarship.service_charge)
    }

    /// Pay the fee and record the application.
    pub async fn pay_and_apply(
        &self,
        scholarship: &Scholarship,
        mut input: CreateApplicationInput,
    ) -> Result<Application, CheckoutError> {
        validate_application(&input)?;

        if self.public_key.is_none() {
            return Err(PaymentError::NotConfigured.into());
        }

        let summary = Self::summary(scholarship);
        let intent = self.api.create_payment_intent(summary.total()).await?;
        let receipt = self.provider.confirm(&intent.client_secret).await?;
        tracing::info!(
            scholarship_id = %scholarship.id,
            transaction_id = %receipt.transaction_id,
            total = %summary.display_total(),
            "Payment confirmed"
        );

        input.transaction_id = Some(receipt.transaction_id);
        Ok(self.api.submit_application(&input).await?)
    }
}
