use super::{
    client::{encode_segment, ApiClient, Unauthorized},
    credentials::Credentials,
    types::{ApiError, HistoryPage, TrackedVehicle, VehicleChangeHistory, VehicleListEnvelope},
};
use crate::config::Service;

/// Adapter for the tracking service: last-known vehicle state and change history.
#[derive(Clone, Debug)]
pub struct TrackingApi {
    client: ApiClient,
}

impl TrackingApi {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: ApiClient::new(Service::Tracking, credentials),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            client: ApiClient::new_with_base_url(Service::Tracking, base_url, credentials),
        }
    }

    pub async fn list_vehicles(&self) -> Result<Vec<TrackedVehicle>, ApiError> {
        let url = self.client.url("/vehicles").await;
        let envelope: VehicleListEnvelope<TrackedVehicle> = self
            .client
            .send_json(
                self.client.authorized(self.client.http_client().get(url)),
                Unauthorized::ExpireSession,
            )
            .await?;
        Ok(envelope.into_vehicles())
    }

    pub async fn get_vehicle(&self, id: &str) -> Result<TrackedVehicle, ApiError> {
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

    pub async fn get_history(
        &self,
        id: &str,
        page: HistoryPage,
    ) -> Result<VehicleChangeHistory, ApiError> {
        let url = self
            .client
            .url(&format!("/vehicles/{}/history", encode_segment(id)))
            .await;
        let params = [
            ("limit", page.limit.to_string()),
            ("offset", page.offset.to_string()),
        ];
        self.client
            .send_json(
                self.client
                    .authorized(self.client.http_client().get(url).query(&params)),
                Unauthorized::ExpireSession,
            )
            .await
    }
}
