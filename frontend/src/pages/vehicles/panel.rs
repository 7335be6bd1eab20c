use crate::{
    components::{error::InlineErrorMessage, layout::LoadingSpinner},
    pages::vehicles::{components::card::VehicleGrid, view_model::use_tracked_vehicles_view_model},
};
use leptos::*;
use leptos_meta::Title;

#[component]
pub fn TrackedVehiclesPanel() -> impl IntoView {
    let vm = use_tracked_vehicles_view_model();
    let vehicles = vm.vehicles;

    view! {
        <Title text="Fleet | Fleet Admin"/>
        <div class="vehicle-list space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-fg">"Vehicle Fleet"</h1>
                <button class="text-sm text-fg-muted underline" on:click=move |_| vehicles.refetch()>
                    "Refresh"
                </button>
            </div>
            <InlineErrorMessage error=Signal::derive(move || vehicles.error()) />
            {move || match vehicles.data() {
                Some(list) => view! { <VehicleGrid vehicles=list /> }.into_view(),
                None if vehicles.error().is_none() => {
                    view! { <LoadingSpinner label="Loading vehicles..." /> }.into_view()
                }
                None => ().into_view(),
            }}
        </div>
    }
}
