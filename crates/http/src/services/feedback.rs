//! Customer feedback and complaints

use super::resource::Resource;
use crate::client::{ApiClient, ClientError};
use crate::types::Page;
use reqwest::Method;
use serde_json::{Value, json};

#[derive(Clone, Debug)]
pub struct FeedbackService {
    resource: Resource,
}

impl FeedbackService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/feedback"),
        }
    }

    pub async fn submit(&self, feedback: &Value) -> Result<Value, ClientError> {
        self.resource.create(feedback).await
    }

    /// All feedback (admin)
    pub async fn list(&self, page: Page) -> Result<Value, ClientError> {
        self.resource.list(page).await
    }

    pub async fn delete(&self, feedback_id: &str) -> Result<Value, ClientError> {
        self.resource.delete(feedback_id).await
    }
}

#[derive(Clone, Debug)]
pub struct ComplaintService {
    resource: Resource,
}

impl ComplaintService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/complaints"),
        }
    }

    /// File a complaint about an order
    pub async fn submit(&self, complaint: &Value) -> Result<Value, ClientError> {
        self.resource.create(complaint).await
    }

    pub async fn list(&self, page: Page) -> Result<Value, ClientError> {
        self.resource.list(page).await
    }

    /// Resolve or reject a complaint (admin)
    pub async fn update_status(
        &self,
        complaint_id: &str,
        status: &str,
    ) -> Result<Value, ClientError> {
        let client = self.resource.client();
        let request = client
            .request(Method::PUT, &self.resource.item_path(complaint_id))
            .json(&json!({ "status": status }));
        client.execute(request).await
    }
}
