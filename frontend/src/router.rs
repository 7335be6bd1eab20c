use leptos::*;
use leptos_router::*;

use crate::{
    api::{ApiContext, Credentials},
    components::{guard::RequireAuth, layout::Layout},
    pages::{
        login::LoginPage, vehicle_detail::VehicleDetailPage,
        vehicle_registry::VehicleRegistryPage, vehicles::TrackedVehiclesPage,
    },
    query::{provide_query_client, QueryClient},
    state::auth::AuthProvider,
};

pub const ROUTE_PATHS: &[&str] = &["/login", "/", "/vehicles/:id", "/vehicle-svc"];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/", "/vehicles/:id", "/vehicle-svc"];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/login"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(ApiContext::new(Credentials::browser()));
    provide_query_client(QueryClient::new());
    view! {
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/" view=ProtectedFleet/>
                    <Route path="/vehicles/:id" view=ProtectedVehicleDetail/>
                    <Route path="/vehicle-svc" view=ProtectedVehicleRegistry/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

/// Client-side navigation; must run beneath the `<Router>`.
#[cfg(target_arch = "wasm32")]
pub fn navigate_to(path: &str) {
    let navigate = use_navigate();
    navigate(path, Default::default());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn navigate_to(path: &str) {
    log::debug!("navigate to {}", path);
}

#[component]
fn ProtectedFleet() -> impl IntoView {
    view! { <RequireAuth><Layout><TrackedVehiclesPage/></Layout></RequireAuth> }
}

#[component]
fn ProtectedVehicleDetail() -> impl IntoView {
    view! { <RequireAuth><Layout><VehicleDetailPage/></Layout></RequireAuth> }
}

#[component]
fn ProtectedVehicleRegistry() -> impl IntoView {
    view! { <RequireAuth><Layout><VehicleRegistryPage/></Layout></RequireAuth> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_route_is_either_public_or_protected() {
        let mut classified: Vec<&str> = PROTECTED_ROUTE_PATHS
            .iter()
            .chain(PUBLIC_ROUTE_PATHS)
            .copied()
            .collect();
        classified.sort_unstable();
        let mut all = ROUTE_PATHS.to_vec();
        all.sort_unstable();
        assert_eq!(classified, all);
    }

    #[test]
    fn login_is_the_only_public_route() {
        assert_eq!(PUBLIC_ROUTE_PATHS, &[crate::components::guard::LOGIN_PATH]);
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }
}
