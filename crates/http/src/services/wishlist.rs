//! Wishlist

use crate::client::{ApiClient, ClientError};
use reqwest::Method;
use serde_json::{Value, json};

#[derive(Clone, Debug)]
pub struct WishlistService {
    client: ApiClient,
}

impl WishlistService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Value, ClientError> {
        let request = self.client.request(Method::GET, "/wishlist");
        self.client.execute(request).await
    }

    pub async fn add(&self, product_id: &str) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::POST, "/wishlist")
            .json(&json!({ "productId": product_id }));
        self.client.execute(request).await
    }

    pub async fn remove(&self, product_id: &str) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::DELETE, &format!("/wishlist/{product_id}"));
        self.client.execute(request).await
    }
}
