//! Payment and checkout models

use serde::{Deserialize, Serialize};

/// Payment intent created by the backend on behalf of the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    /// Provider secret the confirmation step presents
    pub client_secret: String,
}

/// Result of a confirmed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    /// Provider-issued transaction id, recorded on the application
    pub transaction_id: String,
}

/// The amounts a checkout screen presents before payment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutSummary {
    /// Application fee in USD
    pub application_fees: f64,
    /// Service charge in USD
    pub service_charge: f64,
}

impl CheckoutSummary {
    pub fn new(application_fees: f64, service_charge: f64) -> Self {
        Self {
            application_fees,
            service_charge,
        }
    }

    /// Amount actually charged.
    pub fn total(&self) -> f64 {
        self.application_fees + self.service_charge
    }

    /// Total as presented to the user, two decimal places.
    pub fn display_total(&self) -> String {
        format!("${:.2}", self.total())
    }
}
