//! Shopping cart

use crate::client::{ApiClient, ClientError};
use crate::types::CartItemRequest;
use reqwest::Method;
use serde_json::{Value, json};

#[derive(Clone, Debug)]
pub struct CartService {
    client: ApiClient,
}

impl CartService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<Value, ClientError> {
        let request = self.client.request(Method::GET, "/cart");
        self.client.execute(request).await
    }

    pub async fn add_item(&self, product_id: &str, quantity: u32) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::POST, "/cart")
            .json(&CartItemRequest {
                product_id: product_id.to_string(),
                quantity,
            });
        self.client.execute(request).await
    }

    pub async fn update_item(&self, item_id: &str, quantity: u32) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::PUT, &format!("/cart/{item_id}"))
            .json(&json!({ "quantity": quantity }));
        self.client.execute(request).await
    }

    pub async fn remove_item(&self, item_id: &str) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::DELETE, &format!("/cart/{item_id}"));
        self.client.execute(request).await
    }

    /// Empty the cart, e.g. after checkout
    pub async fn clear(&self) -> Result<Value, ClientError> {
        let request = self.client.request(Method::DELETE, "/cart");
        self.client.execute(request).await
    }
}
