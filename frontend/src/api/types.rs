use chrono::{DateTime, Utc};
use leptos::{IntoView, View};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

impl AuthUser {
    pub fn display_name(&self) -> &str {
        if self.email.is_empty() {
            &self.name
        } else {
            &self.email
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
    OutOfService,
    #[serde(other)]
    Unknown,
}

impl VehicleStatus {
    pub const SELECTABLE: [VehicleStatus; 4] = [
        VehicleStatus::Available,
        VehicleStatus::InUse,
        VehicleStatus::Maintenance,
        VehicleStatus::OutOfService,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::InUse => "in_use",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::OutOfService => "out_of_service",
            VehicleStatus::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::InUse => "In Use",
            VehicleStatus::Maintenance => "Maintenance",
            VehicleStatus::OutOfService => "Out of Service",
            VehicleStatus::Unknown => "Unknown",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::SELECTABLE
            .into_iter()
            .find(|status| status.as_str() == raw.trim())
    }
}

/// Vehicle as owned by the registry service; `version` is bumped on every accepted write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub vin: String,
    #[serde(rename = "vehicleName")]
    pub name: String,
    #[serde(rename = "vehicleModel")]
    pub model: String,
    pub license_number: String,
    pub status: VehicleStatus,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub mileage: f64,
    #[serde(default)]
    pub fuel_level: f64,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Last known state of a vehicle as projected by the tracking service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedVehicle {
    pub id: String,
    pub vin: String,
    #[serde(rename = "vehicleName")]
    pub name: String,
    #[serde(rename = "vehicleModel")]
    pub model: String,
    pub license_number: String,
    pub status: VehicleStatus,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub mileage: f64,
    #[serde(default)]
    pub fuel_level: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleListEnvelope<T> {
    pub vehicles: Option<Vec<T>>,
}

impl<T> VehicleListEnvelope<T> {
    pub fn into_vehicles(self) -> Vec<T> {
        self.vehicles.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub vin: String,
    #[serde(rename = "vehicleName")]
    pub name: String,
    #[serde(rename = "vehicleModel")]
    pub model: String,
    pub license_number: String,
    pub status: VehicleStatus,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub mileage: f64,
    pub fuel_level: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLocationRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: VehicleStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMileageRequest {
    pub mileage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFuelRequest {
    pub fuel_level: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Created,
    LocationUpdated,
    StatusChanged,
    MileageUpdated,
    FuelUpdated,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleChangeRecord {
    pub vehicle_id: String,
    #[serde(default)]
    pub vin: String,
    pub change_type: ChangeType,
    #[serde(default)]
    pub old_value: Map<String, Value>,
    #[serde(default)]
    pub new_value: Map<String, Value>,
    pub changed_at: String,
    #[serde(default)]
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleChangeHistory {
    pub vehicle_id: String,
    #[serde(default)]
    pub changes: Vec<VehicleChangeRecord>,
    #[serde(default)]
    pub total: i64,
}

/// Pagination window for the tracking history endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistoryPage {
    pub limit: u32,
    pub offset: u32,
}

impl Default for HistoryPage {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Auth,
    Network,
    Authorization,
    NotFound,
    Server,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

/// Error bodies differ per service: `{code, message, details}` or `{message}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<Value>,
}

impl ApiError {
    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            status: None,
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "VALIDATION_ERROR")
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "NETWORK_ERROR")
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNKNOWN")
    }

    /// Builds an error from a non-2xx response, preferring the message the service sent.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let fallback_code = match status {
            401 | 403 => "UNAUTHORIZED",
            404 => "NOT_FOUND",
            400 | 422 => "VALIDATION_ERROR",
            500..=599 => "SERVER_ERROR",
            _ => "UNKNOWN",
        };
        let message = parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        Self {
            error: message,
            code: parsed
                .code
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| fallback_code.to_string()),
            status: Some(status),
            details: parsed.details,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status {
            Some(401) | Some(403) if self.code != "AUTH_ERROR" => ErrorKind::Authorization,
            Some(404) => ErrorKind::NotFound,
            Some(500..=599) => ErrorKind::Server,
            _ => match self.code.as_str() {
                "VALIDATION_ERROR" => ErrorKind::Validation,
                "AUTH_ERROR" => ErrorKind::Auth,
                "NETWORK_ERROR" => ErrorKind::Network,
                "UNAUTHORIZED" => ErrorKind::Authorization,
                "NOT_FOUND" => ErrorKind::NotFound,
                "SERVER_ERROR" => ErrorKind::Server,
                _ if matches!(self.status, Some(400..=499)) => ErrorKind::Validation,
                _ => ErrorKind::Unknown,
            },
        }
    }

    /// Transport failures and 5xx responses are worth another attempt; 4xx never are.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Network | ErrorKind::Server)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vehicle_deserializes_registry_payload() {
        let vehicle: Vehicle = serde_json::from_value(json!({
            "id": "123",
            "vin": "1HGCM82633A004352",
            "vehicleName": "Truck 7",
            "vehicleModel": "Volvo FH",
            "licenseNumber": "51A-12345",
            "status": "in_use",
            "latitude": 10.77,
            "longitude": 106.7,
            "altitude": 4.0,
            "mileage": 1520.5,
            "fuelLevel": 64.0,
            "version": 3,
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-02T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(vehicle.name, "Truck 7");
        assert_eq!(vehicle.status, VehicleStatus::InUse);
        assert_eq!(vehicle.version, 3);
        assert!(vehicle.updated_at.is_some());
    }

    #[test]
    fn unknown_status_does_not_break_decoding() {
        let status: VehicleStatus = serde_json::from_value(json!("scrapped")).unwrap();
        assert_eq!(status, VehicleStatus::Unknown);
        assert_eq!(VehicleStatus::parse("maintenance"), Some(VehicleStatus::Maintenance));
        assert_eq!(VehicleStatus::parse("unknown"), None);
    }

    #[test]
    fn envelope_without_vehicles_is_empty() {
        let missing: VehicleListEnvelope<Vehicle> = serde_json::from_value(json!({})).unwrap();
        assert!(missing.into_vehicles().is_empty());
        let null: VehicleListEnvelope<Vehicle> =
            serde_json::from_value(json!({ "vehicles": null })).unwrap();
        assert!(null.into_vehicles().is_empty());
    }

    #[test]
    fn create_request_uses_service_field_names() {
        let body = serde_json::to_value(CreateVehicleRequest {
            vin: "V".into(),
            name: "N".into(),
            model: "M".into(),
            license_number: "L".into(),
            status: VehicleStatus::OutOfService,
            latitude: 1.0,
            longitude: 2.0,
            altitude: 0.0,
            mileage: 0.0,
            fuel_level: 100.0,
        })
        .unwrap();
        assert_eq!(body["vehicleName"], "N");
        assert_eq!(body["vehicleModel"], "M");
        assert_eq!(body["licenseNumber"], "L");
        assert_eq!(body["status"], "out_of_service");
        assert_eq!(body["fuelLevel"], 100.0);
    }

    #[test]
    fn change_record_keeps_partial_value_maps() {
        let record: VehicleChangeRecord = serde_json::from_value(json!({
            "vehicleId": "123",
            "vin": "V",
            "changeType": "status_changed",
            "oldValue": { "status": "available" },
            "newValue": { "status": "maintenance" },
            "changedAt": "2025-01-02T10:00:00Z",
            "version": 4
        }))
        .unwrap();
        assert_eq!(record.change_type, ChangeType::StatusChanged);
        assert_eq!(record.new_value["status"], "maintenance");
    }

    #[test]
    fn error_from_response_prefers_service_message() {
        let err = ApiError::from_response(
            400,
            r#"{"code":"INVALID_STATUS","message":"status is invalid"}"#,
        );
        assert_eq!(err.error, "status is invalid");
        assert_eq!(err.code, "INVALID_STATUS");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!err.is_retryable());

        let auth = ApiError::from_response(401, r#"{"message":"invalid credentials"}"#);
        assert_eq!(auth.code, "UNAUTHORIZED");
        assert_eq!(auth.kind(), ErrorKind::Authorization);
    }

    #[test]
    fn error_from_response_falls_back_on_garbage_body() {
        let err = ApiError::from_response(503, "<html>bad gateway</html>");
        assert_eq!(err.code, "SERVER_ERROR");
        assert_eq!(err.error, "Request failed with status 503");
        assert!(err.is_retryable());
        assert!(ApiError::network("offline").is_retryable());
        assert!(!ApiError::validation("missing vin").is_retryable());
    }
}
