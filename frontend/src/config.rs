use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_AUTH_BASE_URL: &str = "/api/auth";
pub const DEFAULT_VEHICLE_BASE_URL: &str = "/api/vehicle";
pub const DEFAULT_TRACKING_BASE_URL: &str = "/api/tracking";

/// Base URLs of the three backend services the dashboard talks to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default, alias = "AUTH_BASE_URL")]
    pub auth_base_url: Option<String>,
    #[serde(default, alias = "VEHICLE_BASE_URL")]
    pub vehicle_base_url: Option<String>,
    #[serde(default, alias = "TRACKING_BASE_URL")]
    pub tracking_base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Auth,
    Vehicle,
    Tracking,
}

impl Service {
    pub fn label(self) -> &'static str {
        match self {
            Service::Auth => "auth",
            Service::Vehicle => "vehicle",
            Service::Tracking => "tracking",
        }
    }
}

/// Fully resolved service endpoints; every field falls back to the dev proxy prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    pub auth: String,
    pub vehicle: String,
    pub tracking: String,
}

impl ServiceEndpoints {
    pub fn from_config(cfg: &RuntimeConfig) -> Self {
        Self {
            auth: normalize_base(cfg.auth_base_url.as_deref(), DEFAULT_AUTH_BASE_URL),
            vehicle: normalize_base(cfg.vehicle_base_url.as_deref(), DEFAULT_VEHICLE_BASE_URL),
            tracking: normalize_base(
                cfg.tracking_base_url.as_deref(),
                DEFAULT_TRACKING_BASE_URL,
            ),
        }
    }

    pub fn base_url(&self, service: Service) -> &str {
        match service {
            Service::Auth => &self.auth,
            Service::Vehicle => &self.vehicle,
            Service::Tracking => &self.tracking,
        }
    }
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self::from_config(&RuntimeConfig::default())
    }
}

static ENDPOINTS: OnceLock<ServiceEndpoints> = OnceLock::new();

fn normalize_base(value: Option<&str>, fallback: &str) -> String {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback);
    raw.trim_end_matches('/').to_string()
}

/// Turns a root-relative base such as `/api/auth` into an absolute URL using the page origin.
pub fn absolutize(base: &str) -> String {
    if base.starts_with("http://") || base.starts_with("https://") {
        return base.to_string();
    }
    let origin = page_origin().unwrap_or_else(|| "http://localhost:3000".to_string());
    format!("{}/{}", origin.trim_end_matches('/'), base.trim_start_matches('/'))
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn config_from_globals() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn config_from_globals() -> Option<RuntimeConfig> {
    // Optional global object: window.__FLEET_ADMIN_ENV = { AUTH_BASE_URL: "...", ... }
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &"__FLEET_ADMIN_ENV".into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let read = |upper: &str, lower: &str| {
        js_sys::Reflect::get(&any, &upper.into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .or_else(|| js_sys::Reflect::get(&any, &lower.into()).ok())
            .and_then(|v| v.as_string())
    };
    Some(RuntimeConfig {
        auth_base_url: read("AUTH_BASE_URL", "auth_base_url"),
        vehicle_base_url: read("VEHICLE_BASE_URL", "vehicle_base_url"),
        tracking_base_url: read("TRACKING_BASE_URL", "tracking_base_url"),
    })
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let resp = reqwest::get(absolutize("/config.json")).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

pub async fn await_endpoints() -> ServiceEndpoints {
    if let Some(cached) = ENDPOINTS.get() {
        return cached.clone();
    }
    let cfg = match config_from_globals() {
        Some(cfg) => cfg,
        None => fetch_runtime_config().await.unwrap_or_default(),
    };
    let endpoints = ServiceEndpoints::from_config(&cfg);
    log::debug!("resolved service endpoints: {:?}", endpoints);
    ENDPOINTS.get_or_init(|| endpoints).clone()
}

pub async fn await_base_url(service: Service) -> String {
    absolutize(await_endpoints().await.base_url(service))
}

pub async fn init() {
    let _ = await_endpoints().await;
}
