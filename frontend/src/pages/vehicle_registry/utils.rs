use crate::api::{
    ApiError, CreateVehicleRequest, UpdateFuelRequest, UpdateLocationRequest,
    UpdateMileageRequest, Vehicle, VehicleStatus,
};

pub const DEFAULT_ALTITUDE: f64 = 0.0;
pub const DEFAULT_MILEAGE: f64 = 0.0;
pub const DEFAULT_FUEL_LEVEL: f64 = 100.0;

/// Raw text of the create form, exactly as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateVehicleForm {
    pub vin: String,
    pub name: String,
    pub model: String,
    pub license_number: String,
    pub status: VehicleStatus,
    pub latitude: String,
    pub longitude: String,
    pub altitude: String,
    pub mileage: String,
    pub fuel_level: String,
}

impl Default for CreateVehicleForm {
    fn default() -> Self {
        Self {
            vin: String::new(),
            name: String::new(),
            model: String::new(),
            license_number: String::new(),
            status: VehicleStatus::Available,
            latitude: String::new(),
            longitude: String::new(),
            altitude: "0".into(),
            mileage: "0".into(),
            fuel_level: "100".into(),
        }
    }
}

impl CreateVehicleForm {
    pub fn to_request(&self) -> Result<CreateVehicleRequest, ApiError> {
        let vin = required_text(&self.vin, "VIN")?;
        let name = required_text(&self.name, "Vehicle name")?;
        let model = required_text(&self.model, "Model")?;
        let license_number = required_text(&self.license_number, "License number")?;
        let (latitude, longitude) = coordinates(&self.latitude, &self.longitude)?;
        if matches!(self.status, VehicleStatus::Unknown) {
            return Err(ApiError::validation("Status is required"));
        }
        let mileage = non_negative_mileage(optional_number(&self.mileage, DEFAULT_MILEAGE))?;
        Ok(CreateVehicleRequest {
            vin,
            name,
            model,
            license_number,
            status: self.status,
            latitude,
            longitude,
            altitude: optional_number(&self.altitude, DEFAULT_ALTITUDE),
            mileage,
            fuel_level: clamp_fuel(optional_number(&self.fuel_level, DEFAULT_FUEL_LEVEL)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationForm {
    pub latitude: String,
    pub longitude: String,
    pub altitude: String,
}

impl LocationForm {
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            latitude: vehicle.latitude.to_string(),
            longitude: vehicle.longitude.to_string(),
            altitude: vehicle.altitude.to_string(),
        }
    }

    pub fn to_request(&self, timestamp_ms: i64) -> Result<UpdateLocationRequest, ApiError> {
        let (latitude, longitude) = coordinates(&self.latitude, &self.longitude)?;
        Ok(UpdateLocationRequest {
            latitude,
            longitude,
            altitude: Some(optional_number(&self.altitude, DEFAULT_ALTITUDE)),
            timestamp: timestamp_ms,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadingsForm {
    pub mileage: String,
    pub fuel_level: String,
}

impl ReadingsForm {
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            mileage: vehicle.mileage.to_string(),
            fuel_level: vehicle.fuel_level.to_string(),
        }
    }

    pub fn to_requests(&self) -> Result<(UpdateMileageRequest, UpdateFuelRequest), ApiError> {
        let mileage = non_negative_mileage(required_number(&self.mileage, "Mileage")?)?;
        let fuel_level = clamp_fuel(required_number(&self.fuel_level, "Fuel level")?);
        Ok((UpdateMileageRequest { mileage }, UpdateFuelRequest { fuel_level }))
    }
}

fn required_text(raw: &str, label: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{} is required", label)));
    }
    Ok(trimmed.to_string())
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn required_number(raw: &str, label: &str) -> Result<f64, ApiError> {
    if raw.trim().is_empty() {
        return Err(ApiError::validation(format!("{} is required", label)));
    }
    parse_number(raw).ok_or_else(|| ApiError::validation(format!("{} must be a number", label)))
}

/// Blank or unparseable input falls back; an explicit zero is kept.
fn optional_number(raw: &str, fallback: f64) -> f64 {
    parse_number(raw).unwrap_or(fallback)
}

fn coordinates(latitude: &str, longitude: &str) -> Result<(f64, f64), ApiError> {
    let latitude = required_number(latitude, "Latitude")?;
    let longitude = required_number(longitude, "Longitude")?;
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ApiError::validation("Latitude must be between -90 and 90"));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ApiError::validation("Longitude must be between -180 and 180"));
    }
    Ok((latitude, longitude))
}

fn non_negative_mileage(mileage: f64) -> Result<f64, ApiError> {
    if mileage < 0.0 {
        return Err(ApiError::validation("Mileage cannot be negative"));
    }
    Ok(mileage)
}

pub fn clamp_fuel(level: f64) -> f64 {
    level.clamp(0.0, 100.0)
}
