use leptos::*;

pub mod components;
pub mod view_model;

mod panel;

pub use panel::TrackedVehiclesPanel;

#[component]
pub fn TrackedVehiclesPage() -> impl IntoView {
    view! { <TrackedVehiclesPanel /> }
}
