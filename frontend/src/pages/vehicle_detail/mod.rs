use leptos::*;

pub mod components;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::VehicleDetailRoute;

#[component]
pub fn VehicleDetailPage() -> impl IntoView {
    view! { <VehicleDetailRoute /> }
}
