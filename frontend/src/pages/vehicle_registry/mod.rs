use leptos::*;

pub mod components;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::VehicleRegistryPanel;

#[component]
pub fn VehicleRegistryPage() -> impl IntoView {
    view! { <VehicleRegistryPanel /> }
}
