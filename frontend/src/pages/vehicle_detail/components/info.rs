use crate::{
    api::TrackedVehicle,
    components::common::StatusBadge,
    utils::{
        format::{format_coords, format_km, format_percent},
        time::format_timestamp,
    },
};
use leptos::*;

#[component]
pub fn VehicleInfoCard(vehicle: TrackedVehicle) -> impl IntoView {
    let items = vec![
        ("VIN", vehicle.vin.clone()),
        ("Model", vehicle.model.clone()),
        ("License Number", vehicle.license_number.clone()),
        ("Mileage", format_km(vehicle.mileage)),
        ("Fuel Level", format_percent(vehicle.fuel_level)),
        (
            "Location",
            format_coords(vehicle.latitude, vehicle.longitude, 6),
        ),
        ("Altitude", format!("{:.1} m", vehicle.altitude)),
        (
            "Last Update",
            vehicle
                .updated_at
                .as_ref()
                .map(format_timestamp)
                .unwrap_or_else(|| "-".into()),
        ),
    ];

    view! {
        <div class="vehicle-info-card rounded-lg border border-border bg-surface-elevated p-6">
            <div class="vehicle-header flex items-center justify-between">
                <h1 class="text-2xl font-bold text-fg">{vehicle.name.clone()}</h1>
                <StatusBadge status=vehicle.status />
            </div>
            <div class="info-grid mt-4 grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                {items
                    .into_iter()
                    .map(|(label, value)| view! {
                        <div class="info-item">
                            <label class="block text-xs uppercase text-fg-muted">{label}</label>
                            <span class="text-fg">{value}</span>
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
