use crate::{
    api::TrackedVehicle,
    components::{common::StatusBadge, empty_state::EmptyState},
    utils::format::{format_km, format_percent, vehicle_href},
};
use leptos::*;

#[component]
pub fn VehicleCard(vehicle: TrackedVehicle) -> impl IntoView {
    view! {
        <a href=vehicle_href(&vehicle.id) class="vehicle-card block rounded-lg border border-border bg-surface-elevated p-4 hover:shadow-md">
            <div class="vehicle-header flex items-center justify-between">
                <h3 class="font-semibold text-fg">{vehicle.name.clone()}</h3>
                <StatusBadge status=vehicle.status />
            </div>
            <dl class="vehicle-details mt-3 space-y-1 text-sm text-fg-muted">
                <p><strong>"VIN: "</strong>{vehicle.vin.clone()}</p>
                <p><strong>"Model: "</strong>{vehicle.model.clone()}</p>
                <p><strong>"License: "</strong>{vehicle.license_number.clone()}</p>
                <p><strong>"Mileage: "</strong>{format_km(vehicle.mileage)}</p>
                <p><strong>"Fuel: "</strong>{format_percent(vehicle.fuel_level)}</p>
            </dl>
        </a>
    }
}

#[component]
pub fn VehicleGrid(vehicles: Vec<TrackedVehicle>) -> impl IntoView {
    if vehicles.is_empty() {
        return view! {
            <EmptyState
                title="No vehicles yet"
                description="Vehicles appear here once the registry publishes them."
            />
        }
        .into_view();
    }
    view! {
        <div class="vehicle-grid grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
            {vehicles
                .into_iter()
                .map(|vehicle| view! { <VehicleCard vehicle=vehicle /> })
                .collect_view()}
        </div>
    }
    .into_view()
}
