use crate::{
    api::{Vehicle, VehicleStatus},
    components::{common::ButtonVariant, empty_state::EmptyState},
    utils::format::{format_coords, format_km, format_percent},
};
use leptos::*;
use web_sys::HtmlSelectElement;

const ACTION_CLASS: &str = "rounded-md font-semibold";

#[component]
pub fn StatusOptions(selected: VehicleStatus) -> impl IntoView {
    VehicleStatus::SELECTABLE
        .iter()
        .map(|status| {
            view! {
                <option value=status.as_str() selected={*status == selected}>
                    {status.label()}
                </option>
            }
        })
        .collect_view()
}

#[component]
pub fn VehicleRow(
    vehicle: Vehicle,
    on_status: Callback<(String, VehicleStatus)>,
    on_location: Callback<Vehicle>,
    on_readings: Callback<Vehicle>,
) -> impl IntoView {
    let id = vehicle.id.clone();
    let status = vehicle.status;
    let for_location = vehicle.clone();
    let for_readings = vehicle.clone();
    let action_class = format!("{} {}", ACTION_CLASS, ButtonVariant::Small.classes());
    view! {
        <tr>
            <td>{vehicle.vin.clone()}</td>
            <td>{vehicle.name.clone()}</td>
            <td>{vehicle.model.clone()}</td>
            <td>{vehicle.license_number.clone()}</td>
            <td>
                <select
                    class={format!("status-select status-{}", status.as_str())}
                    on:change=move |ev| {
                        let raw = event_target::<HtmlSelectElement>(&ev).value();
                        match VehicleStatus::parse(&raw) {
                            Some(next) if next != status => on_status.call((id.clone(), next)),
                            _ => {}
                        }
                    }
                >
                    <StatusOptions selected=status />
                </select>
            </td>
            <td>{format_coords(vehicle.latitude, vehicle.longitude, 4)}</td>
            <td>{format_km(vehicle.mileage)}</td>
            <td>{format_percent(vehicle.fuel_level)}</td>
            <td>{vehicle.version}</td>
            <td class="space-x-2 whitespace-nowrap">
                <button
                    type="button"
                    class=action_class.clone()
                    on:click=move |_| on_location.call(for_location.clone())
                >
                    "Update Location"
                </button>
                <button
                    type="button"
                    class=action_class.clone()
                    on:click=move |_| on_readings.call(for_readings.clone())
                >
                    "Update Readings"
                </button>
            </td>
        </tr>
    }
}

#[component]
pub fn VehicleTable(
    vehicles: Vec<Vehicle>,
    on_status: Callback<(String, VehicleStatus)>,
    on_location: Callback<Vehicle>,
    on_readings: Callback<Vehicle>,
) -> impl IntoView {
    if vehicles.is_empty() {
        return view! {
            <EmptyState
                title="No vehicles registered"
                description="Create the first vehicle to start tracking it."
            />
        }
        .into_view();
    }
    view! {
        <div class="vehicles-table overflow-x-auto">
            <table class="min-w-full text-sm">
                <thead>
                    <tr>
                        <th>"VIN"</th>
                        <th>"Name"</th>
                        <th>"Model"</th>
                        <th>"License"</th>
                        <th>"Status"</th>
                        <th>"Location"</th>
                        <th>"Mileage"</th>
                        <th>"Fuel"</th>
                        <th>"Version"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {vehicles
                        .into_iter()
                        .map(|vehicle| view! {
                            <VehicleRow
                                vehicle=vehicle
                                on_status=on_status
                                on_location=on_location
                                on_readings=on_readings
                            />
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
    .into_view()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::fixtures::vehicle_json;
    use crate::test_support::ssr::render_to_string;

    fn vehicle(id: &str, status: &str) -> Vehicle {
        serde_json::from_value(vehicle_json(id, status, 4)).unwrap()
    }

    #[test]
    fn table_renders_rows_with_selected_status() {
        let vehicles = vec![vehicle("1", "in_use"), vehicle("2", "out_of_service")];
        let html = render_to_string(move || {
            view! {
                <VehicleTable
                    vehicles=vehicles
                    on_status=Callback::new(|_| {})
                    on_location=Callback::new(|_| {})
                    on_readings=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("VIN1"));
        assert!(html.contains("status-select status-in_use"));
        assert!(html.contains("status-select status-out_of_service"));
        assert!(html.contains("10.7769, 106.7009"));
        assert!(html.contains("Update Location"));
    }

    #[test]
    fn empty_registry_renders_empty_state() {
        let html = render_to_string(|| {
            view! {
                <VehicleTable
                    vehicles=Vec::new()
                    on_status=Callback::new(|_| {})
                    on_location=Callback::new(|_| {})
                    on_readings=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("No vehicles registered"));
        assert!(!html.contains("<table"));
    }
}
