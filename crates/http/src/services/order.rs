//! Orders and checkout

use crate::client::{ApiClient, ClientError};
use crate::types::Page;
use reqwest::Method;
use serde_json::{Map, Value};

#[derive(Clone, Debug)]
pub struct OrderService {
    client: ApiClient,
}

impl OrderService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Orders of the signed-in customer
    pub async fn list(&self, page: Page) -> Result<Value, ClientError> {
        let request = self.client.request(Method::GET, "/orders").query(&page);
        self.client.execute(request).await
    }

    pub async fn get(&self, order_id: &str) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::GET, &format!("/orders/{order_id}"));
        self.client.execute(request).await
    }

    /// Place an order from the checkout form
    pub async fn create(&self, order: &Value) -> Result<Value, ClientError> {
        let request = self.client.request(Method::POST, "/orders").json(order);
        self.client.execute(request).await
    }

    pub async fn cancel(&self, order_id: &str) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::PUT, &format!("/orders/{order_id}/cancel"));
        self.client.execute(request).await
    }

    /// Current delivery status, polled by the order tracking page
    pub async fn status(&self, order_id: &str) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::GET, &format!("/orders/{order_id}/status"));
        self.client.execute(request).await
    }

    /// Forward the payment gateway's return query string to the backend
    ///
    /// The gateway redirects back with its result in the query string; it is
    /// decoded into key/value pairs and re-sent as the query of a GET.
    pub async fn confirm_payment(&self, return_query: &str) -> Result<Value, ClientError> {
        let params = query_to_object(return_query);
        let request = self
            .client
            .request(Method::GET, "/orders/payment-return")
            .query(&params);
        self.client.execute(request).await
    }

    /// Every order in the shop (admin)
    pub async fn list_all(&self, page: Page) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::GET, "/orders/admin")
            .query(&page);
        self.client.execute(request).await
    }

    /// Move an order through fulfilment (admin)
    pub async fn update_status(&self, order_id: &str, status: &str) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::PUT, &format!("/orders/{order_id}/status"))
            .json(&serde_json::json!({ "status": status }));
        self.client.execute(request).await
    }
}

/// `?a=1&b=x%20y` to `{"a": "1", "b": "x y"}`; later duplicates win
fn query_to_object(query: &str) -> Map<String, Value> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect()
}
