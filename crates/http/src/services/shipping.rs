//! Shipping addresses and fees, proxied by the backend to GHN

use crate::client::{ApiClient, ClientError};
use crate::types::ShippingFeeRequest;
use reqwest::Method;
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct ShippingService {
    client: ApiClient,
}

impl ShippingService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn provinces(&self) -> Result<Value, ClientError> {
        let request = self.client.request(Method::GET, "/shipping/provinces");
        self.client.execute(request).await
    }

    pub async fn districts(&self, province_id: u32) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::GET, "/shipping/districts")
            .query(&[("provinceId", province_id)]);
        self.client.execute(request).await
    }

    pub async fn wards(&self, district_id: u32) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::GET, "/shipping/wards")
            .query(&[("districtId", district_id)]);
        self.client.execute(request).await
    }

    pub async fn fee(&self, parcel: &ShippingFeeRequest) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::POST, "/shipping/fee")
            .json(parcel);
        self.client.execute(request).await
    }
}
