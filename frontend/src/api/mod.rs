mod auth;
pub mod client;
pub mod credentials;
mod tracking;
pub mod types;
mod vehicles;

pub use auth::AuthApi;
pub use credentials::Credentials;
pub use tracking::TrackingApi;
pub use types::*;
pub use vehicles::VehicleApi;

use leptos::use_context;

/// The three service adapters sharing one set of credentials; provided as context at the app root.
#[derive(Clone, Debug)]
pub struct ApiContext {
    pub auth: AuthApi,
    pub vehicles: VehicleApi,
    pub tracking: TrackingApi,
    pub credentials: Credentials,
}

impl ApiContext {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            auth: AuthApi::new(credentials.clone()),
            vehicles: VehicleApi::new(credentials.clone()),
            tracking: TrackingApi::new(credentials.clone()),
            credentials,
        }
    }

    pub fn with_base_urls(
        auth: &str,
        vehicles: &str,
        tracking: &str,
        credentials: Credentials,
    ) -> Self {
        Self {
            auth: AuthApi::new_with_base_url(auth, credentials.clone()),
            vehicles: VehicleApi::new_with_base_url(vehicles, credentials.clone()),
            tracking: TrackingApi::new_with_base_url(tracking, credentials.clone()),
            credentials,
        }
    }
}

pub fn use_api() -> ApiContext {
    use_context::<ApiContext>().unwrap_or_else(|| ApiContext::new(Credentials::browser()))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
