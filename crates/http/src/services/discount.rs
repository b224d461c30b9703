//! Discount codes

use crate::client::{ApiClient, ClientError};
use crate::types::ApplyDiscountRequest;
use reqwest::Method;
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct DiscountService {
    client: ApiClient,
}

impl DiscountService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Codes currently offered
    pub async fn list(&self) -> Result<Value, ClientError> {
        let request = self.client.request(Method::GET, "/discounts");
        self.client.execute(request).await
    }

    /// Ask the backend what a code takes off `order_total`
    pub async fn apply(&self, code: &str, order_total: u64) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::POST, "/discounts/apply")
            .json(&ApplyDiscountRequest {
                code: code.to_string(),
                order_total,
            });
        self.client.execute(request).await
    }
}
