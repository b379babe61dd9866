//! Payment endpoints
//!
//! The backend creates the payment intent; confirmation happens against the
//! hosted provider through the checkout service.

use serde::Serialize;

use crate::client::{ApiClient, ApiError};
use crate::models::PaymentIntent;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IntentRequest {
    amount: f64,
}

impl ApiClient {
    /// POST /create-payment-intent - amount in USD.
    pub async fn create_payment_intent(&self, amount: f64) -> Result<PaymentIntent, ApiError> {
        self.post_json("/create-payment-intent", &IntentRequest { amount })
            .await
    }
}
