use crate::{
    components::{error::InlineErrorMessage, layout::LoadingSpinner},
    pages::vehicle_detail::{
        components::{history::HistorySection, info::VehicleInfoCard},
        view_model::use_vehicle_detail_view_model,
    },
};
use leptos::*;
use leptos_meta::Title;
use leptos_router::use_params_map;

#[component]
pub fn VehicleDetailPanel(id: String) -> impl IntoView {
    let vm = use_vehicle_detail_view_model(id.clone());
    let vehicle = vm.vehicle;
    let not_found = move || {
        vehicle
            .error()
            .map(|err| err.code == "NOT_FOUND")
            .unwrap_or(false)
    };

    view! {
        <Title text=move || {
            vehicle
                .data()
                .map(|v| format!("{} | Fleet Admin", v.name))
                .unwrap_or_else(|| "Vehicle | Fleet Admin".to_string())
        }/>
        <div class="vehicle-detail space-y-4">
            <a href="/" class="back-link text-sm text-fg-muted hover:text-fg">"← Back to Fleet"</a>
            <Show
                when=not_found
                fallback=move || view! { <InlineErrorMessage error=Signal::derive(move || vehicle.error()) /> }
            >
                <div class="error text-fg">"Vehicle not found"</div>
            </Show>
            {move || match vehicle.data() {
                Some(data) => view! { <VehicleInfoCard vehicle=data /> }.into_view(),
                None if vehicle.error().is_none() => {
                    view! { <LoadingSpinner label="Loading vehicle details..." /> }.into_view()
                }
                None => ().into_view(),
            }}
            <HistorySection id=id />
        </div>
    }
}

#[component]
pub fn VehicleDetailRoute() -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned().unwrap_or_default()));
    view! {
        {move || {
            let id = id.get();
            view! { <VehicleDetailPanel id=id /> }
        }}
    }
}
