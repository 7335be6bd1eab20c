use crate::{
    components::common::{Button, ButtonVariant},
    pages::vehicle_registry::{
        components::create_form::FormField,
        utils::{LocationForm, ReadingsForm},
        view_model::RegistryViewModel,
    },
};
use leptos::{ev::SubmitEvent, *};

#[component]
fn Modal(#[prop(into)] title: String, on_close: Callback<()>, children: Children) -> impl IntoView {
    view! {
        <div class="modal-overlay fixed inset-0 z-40 flex items-center justify-center bg-overlay-backdrop" on:click=move |_| on_close.call(())>
            <div
                class="modal-content w-full max-w-md rounded-lg bg-surface-elevated p-6 shadow-xl"
                on:click=|ev| ev.stop_propagation()
            >
                <h2 class="text-lg font-semibold text-fg mb-4">{title}</h2>
                {children()}
            </div>
        </div>
    }
}

#[component]
fn ModalActions(
    #[prop(into)] pending: Signal<bool>,
    on_close: Callback<()>,
    submit_label: &'static str,
    pending_label: &'static str,
) -> impl IntoView {
    view! {
        <div class="modal-actions flex justify-end gap-2 pt-2">
            <button
                type="button"
                class=format!("inline-flex items-center justify-center rounded-md text-sm font-semibold {}", ButtonVariant::Secondary.classes())
                on:click=move |_| on_close.call(())
            >
                "Cancel"
            </button>
            <Button loading=pending>
                {move || if pending.get() { pending_label } else { submit_label }}
            </Button>
        </div>
    }
}

#[component]
pub fn LocationModal(vm: RegistryViewModel) -> impl IntoView {
    let form = vm.location_form;
    let pending = vm.location_action.pending();
    let close = Callback::new(move |_: ()| vm.location_target.set(None));
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit_location();
    };

    move || {
        vm.location_target.get().map(|vehicle| {
            view! {
                <Modal title=format!("Update Location - {}", vehicle.name) on_close=close>
                    <form class="space-y-4" on:submit=on_submit>
                        <FormField form=form label="Latitude" name="latitude" input_type="number" required=true
                            read=|f: &LocationForm| f.latitude.clone()
                            write=|f: &mut LocationForm, v| f.latitude = v />
                        <FormField form=form label="Longitude" name="longitude" input_type="number" required=true
                            read=|f: &LocationForm| f.longitude.clone()
                            write=|f: &mut LocationForm, v| f.longitude = v />
                        <FormField form=form label="Altitude" name="altitude" input_type="number"
                            read=|f: &LocationForm| f.altitude.clone()
                            write=|f: &mut LocationForm, v| f.altitude = v />
                        <ModalActions pending=pending on_close=close submit_label="Update" pending_label="Updating..." />
                    </form>
                </Modal>
            }
        })
    }
}

#[component]
pub fn ReadingsModal(vm: RegistryViewModel) -> impl IntoView {
    let form = vm.readings_form;
    let pending = vm.readings_action.pending();
    let close = Callback::new(move |_: ()| vm.readings_target.set(None));
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit_readings();
    };

    move || {
        vm.readings_target.get().map(|vehicle| {
            view! {
                <Modal title=format!("Update Readings - {}", vehicle.name) on_close=close>
                    <form class="space-y-4" on:submit=on_submit>
                        <FormField form=form label="Mileage (km)" name="mileage" input_type="number" required=true
                            read=|f: &ReadingsForm| f.mileage.clone()
                            write=|f: &mut ReadingsForm, v| f.mileage = v />
                        <FormField form=form label="Fuel Level (%)" name="fuelLevel" input_type="number" required=true
                            read=|f: &ReadingsForm| f.fuel_level.clone()
                            write=|f: &mut ReadingsForm, v| f.fuel_level = v />
                        <ModalActions pending=pending on_close=close submit_label="Save" pending_label="Saving..." />
                    </form>
                </Modal>
            }
        })
    }
}
