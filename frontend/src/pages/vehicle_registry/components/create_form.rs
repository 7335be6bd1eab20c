use crate::{
    api::VehicleStatus,
    components::common::Button,
    pages::vehicle_registry::{
        components::table::StatusOptions, utils::CreateVehicleForm, view_model::RegistryViewModel,
    },
};
use leptos::{ev::SubmitEvent, *};
use web_sys::{HtmlInputElement, HtmlSelectElement};

const INPUT_CLASS: &str = "block w-full rounded-md border border-border px-3 py-2 text-sm text-fg";

/// Text or number input bound to one field of a form held in a signal.
#[component]
pub fn FormField<T: 'static>(
    form: RwSignal<T>,
    #[prop(into)] label: String,
    name: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] required: bool,
    read: fn(&T) -> String,
    write: fn(&mut T, String),
) -> impl IntoView {
    let label = if required { format!("{} *", label) } else { label };
    view! {
        <div class="form-group space-y-1">
            <label for=name class="block text-sm font-medium text-fg">{label}</label>
            <input
                id=name
                name=name
                type=input_type
                step=(input_type == "number").then_some("any")
                required=required
                class=INPUT_CLASS
                prop:value=move || form.with(read)
                on:input=move |ev| {
                    let value = event_target::<HtmlInputElement>(&ev).value();
                    form.update(|f| write(f, value));
                }
            />
        </div>
    }
}

#[component]
pub fn CreateVehicleFormView(vm: RegistryViewModel) -> impl IntoView {
    let form = vm.create_form;
    let pending = vm.create_action.pending();
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit_create();
    };
    let selected = move || form.with(|f| f.status);

    view! {
        <div class="create-form-container rounded-lg border border-border bg-surface-elevated p-6">
            <h2 class="text-lg font-semibold text-fg mb-4">"Create New Vehicle"</h2>
            <form class="vehicle-form space-y-4" on:submit=on_submit>
                <div class="form-grid grid gap-4 sm:grid-cols-2">
                    <FormField form=form label="VIN" name="vin" required=true
                        read=|f: &CreateVehicleForm| f.vin.clone()
                        write=|f: &mut CreateVehicleForm, v| f.vin = v />
                    <FormField form=form label="Vehicle Name" name="vehicleName" required=true
                        read=|f: &CreateVehicleForm| f.name.clone()
                        write=|f: &mut CreateVehicleForm, v| f.name = v />
                    <FormField form=form label="Model" name="vehicleModel" required=true
                        read=|f: &CreateVehicleForm| f.model.clone()
                        write=|f: &mut CreateVehicleForm, v| f.model = v />
                    <FormField form=form label="License Number" name="licenseNumber" required=true
                        read=|f: &CreateVehicleForm| f.license_number.clone()
                        write=|f: &mut CreateVehicleForm, v| f.license_number = v />
                    <div class="form-group space-y-1">
                        <label for="status" class="block text-sm font-medium text-fg">"Status *"</label>
                        <select
                            id="status"
                            name="status"
                            class=INPUT_CLASS
                            on:change=move |ev| {
                                let raw = event_target::<HtmlSelectElement>(&ev).value();
                                if let Some(status) = VehicleStatus::parse(&raw) {
                                    form.update(|f| f.status = status);
                                }
                            }
                        >
                            {move || view! { <StatusOptions selected=selected() /> }}
                        </select>
                    </div>
                    <FormField form=form label="Latitude" name="latitude" input_type="number" required=true
                        read=|f: &CreateVehicleForm| f.latitude.clone()
                        write=|f: &mut CreateVehicleForm, v| f.latitude = v />
                    <FormField form=form label="Longitude" name="longitude" input_type="number" required=true
                        read=|f: &CreateVehicleForm| f.longitude.clone()
                        write=|f: &mut CreateVehicleForm, v| f.longitude = v />
                    <FormField form=form label="Altitude" name="altitude" input_type="number"
                        read=|f: &CreateVehicleForm| f.altitude.clone()
                        write=|f: &mut CreateVehicleForm, v| f.altitude = v />
                    <FormField form=form label="Mileage (km)" name="mileage" input_type="number"
                        read=|f: &CreateVehicleForm| f.mileage.clone()
                        write=|f: &mut CreateVehicleForm, v| f.mileage = v />
                    <FormField form=form label="Fuel Level (%)" name="fuelLevel" input_type="number"
                        read=|f: &CreateVehicleForm| f.fuel_level.clone()
                        write=|f: &mut CreateVehicleForm, v| f.fuel_level = v />
                </div>
                <div class="form-actions">
                    <Button loading=pending>
                        {move || if pending.get() { "Creating..." } else { "Create Vehicle" }}
                    </Button>
                </div>
            </form>
        </div>
    }
}
