use super::{
    client::{encode_segment, ApiClient, Unauthorized},
    credentials::Credentials,
    types::{
        ApiError, CreateVehicleRequest, UpdateFuelRequest, UpdateLocationRequest,
        UpdateMileageRequest, UpdateStatusRequest, Vehicle, VehicleListEnvelope,
    },
};
use crate::config::Service;
use serde::Serialize;

/// Adapter for the vehicle registry service. Payloads are passed through unvalidated;
/// forms validate before calling in.
#[derive(Clone, Debug)]
pub struct VehicleApi {
    client: ApiClient,
}

impl VehicleApi {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: ApiClient::new(Service::Vehicle, credentials),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            client: ApiClient::new_with_base_url(Service::Vehicle, base_url, credentials),
        }
    }

    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ApiError> {
        let url = self.client.url("/vehicles").await;
        let envelope: VehicleListEnvelope<Vehicle> = self
            .client
            .send_json(
                self.client.authorized(self.client.http_client().get(url)),
                Unauthorized::ExpireSession,
            )
            .await?;
        Ok(envelope.into_vehicles())
    }

    pub async fn get_vehicle(&self, id: &str) -> Result<Vehicle, ApiError> {
        let url = self
            .client
            .url(&format!("/vehicles/{}", encode_segment(id)))
            .await;
        self.client
            .send_json(
                self.client.authorized(self.client.http_client().get(url)),
                Unauthorized::ExpireSession,
            )
            .await
    }

    pub async fn create_vehicle(&self, request: &CreateVehicleRequest) -> Result<Vehicle, ApiError> {
        let url = self.client.url("/vehicles").await;
        self.client
            .send_json(
                self.client
                    .authorized(self.client.http_client().post(url).json(request)),
                Unauthorized::ExpireSession,
            )
            .await
    }

    async fn patch_field<B: Serialize>(
        &self,
        id: &str,
        field: &str,
        body: &B,
    ) -> Result<Vehicle, ApiError> {
        let url = self
            .client
            .url(&format!("/vehicles/{}/{}", encode_segment(id), field))
            .await;
        self.client
            .send_json(
                self.client
                    .authorized(self.client.http_client().patch(url).json(body)),
                Unauthorized::ExpireSession,
            )
            .await
    }

    pub async fn update_location(
        &self,
        id: &str,
        request: &UpdateLocationRequest,
    ) -> Result<Vehicle, ApiError> {
        self.patch_field(id, "location", request).await
    }

    pub async fn update_status(
        &self,
        id: &str,
        request: &UpdateStatusRequest,
    ) -> Result<Vehicle, ApiError> {
        self.patch_field(id, "status", request).await
    }

    pub async fn update_mileage(
        &self,
        id: &str,
        request: &UpdateMileageRequest,
    ) -> Result<Vehicle, ApiError> {
        self.patch_field(id, "mileage", request).await
    }

    pub async fn update_fuel(&self, id: &str, request: &UpdateFuelRequest) -> Result<Vehicle, ApiError> {
        self.patch_field(id, "fuel", request).await
    }
}
