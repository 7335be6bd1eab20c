use crate::{
    api::{Vehicle, VehicleStatus},
    components::{
        common::{Button, ButtonVariant},
        error::InlineErrorMessage,
        layout::LoadingSpinner,
    },
    pages::vehicle_registry::{
        components::{
            create_form::CreateVehicleFormView,
            modals::{LocationModal, ReadingsModal},
            table::VehicleTable,
        },
        view_model::use_registry_view_model,
    },
};
use leptos::*;
use leptos_meta::Title;

#[component]
pub fn VehicleRegistryPanel() -> impl IntoView {
    let vm = use_registry_view_model();
    let vehicles = vm.vehicles;
    let on_status = Callback::new(move |(id, status): (String, VehicleStatus)| {
        vm.change_status(id, status)
    });
    let on_location = Callback::new(move |vehicle: Vehicle| vm.open_location(vehicle));
    let on_readings = Callback::new(move |vehicle: Vehicle| vm.open_readings(vehicle));
    let error = Signal::derive(move || vm.error.get().or_else(|| vehicles.error()));

    view! {
        <Title text="Vehicle Service | Fleet Admin"/>
        <div class="vehicle-svc-page space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-fg">"Vehicle Service (vehicle-svc)"</h1>
                <Button
                    variant=ButtonVariant::Secondary
                    on:click=move |_| vm.toggle_create()
                >
                    {move || if vm.show_create.get() { "Cancel" } else { "+ Create Vehicle" }}
                </Button>
            </div>
            <InlineErrorMessage error=error />
            <Show when=move || vm.show_create.get()>
                <CreateVehicleFormView vm=vm />
            </Show>
            {move || match vehicles.data() {
                Some(list) => view! {
                    <VehicleTable
                        vehicles=list
                        on_status=on_status
                        on_location=on_location
                        on_readings=on_readings
                    />
                }
                .into_view(),
                None if vehicles.error().is_none() => {
                    view! { <LoadingSpinner label="Loading vehicles..." /> }.into_view()
                }
                None => ().into_view(),
            }}
            <LocationModal vm=vm />
            <ReadingsModal vm=vm />
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::query::{provide_query_client, QueryClient};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn registry_panel_renders_heading_and_spinner() {
        let html = render_to_string(|| {
            provide_query_client(QueryClient::new());
            view! { <VehicleRegistryPanel /> }
        });
        assert!(html.contains("Vehicle Service (vehicle-svc)"));
        assert!(html.contains("+ Create Vehicle"));
        assert!(html.contains("Loading vehicles..."));
        assert!(!html.contains("Create New Vehicle"));
    }
}
