use super::utils::{CreateVehicleForm, LocationForm, ReadingsForm};
use crate::api::{
    use_api, ApiError, CreateVehicleRequest, UpdateFuelRequest, UpdateLocationRequest,
    UpdateMileageRequest, UpdateStatusRequest, Vehicle, VehicleApi, VehicleStatus,
};
use crate::query::{keys, use_mutation, use_query, use_query_client, QueryClient, QueryHandle};
use crate::utils::time::now_millis;
use leptos::*;
use std::future::Future;

pub type LocationUpdate = (String, UpdateLocationRequest);
pub type StatusUpdate = (String, VehicleStatus);
pub type ReadingsUpdate = (String, UpdateMileageRequest, UpdateFuelRequest);

#[derive(Clone, Copy)]
pub struct RegistryViewModel {
    pub vehicles: QueryHandle<Vec<Vehicle>>,
    pub show_create: RwSignal<bool>,
    pub create_form: RwSignal<CreateVehicleForm>,
    /// Vehicle whose location modal is open.
    pub location_target: RwSignal<Option<Vehicle>>,
    pub location_form: RwSignal<LocationForm>,
    pub readings_target: RwSignal<Option<Vehicle>>,
    pub readings_form: RwSignal<ReadingsForm>,
    pub error: RwSignal<Option<ApiError>>,
    pub create_action: Action<CreateVehicleRequest, Result<Vehicle, ApiError>>,
    pub location_action: Action<LocationUpdate, Result<Vehicle, ApiError>>,
    pub status_action: Action<StatusUpdate, Result<Vehicle, ApiError>>,
    pub readings_action: Action<ReadingsUpdate, Result<Vehicle, ApiError>>,
}

impl RegistryViewModel {
    pub fn toggle_create(&self) {
        self.show_create.update(|open| *open = !*open);
        self.error.set(None);
    }

    pub fn submit_create(&self) {
        if self.create_action.pending().get_untracked() {
            return;
        }
        match self.create_form.with_untracked(CreateVehicleForm::to_request) {
            Ok(request) => {
                self.error.set(None);
                self.create_action.dispatch(request);
            }
            Err(err) => self.error.set(Some(err)),
        }
    }

    pub fn change_status(&self, id: String, status: VehicleStatus) {
        self.status_action.dispatch((id, status));
    }

    pub fn open_location(&self, vehicle: Vehicle) {
        self.location_form.set(LocationForm::from_vehicle(&vehicle));
        self.location_target.set(Some(vehicle));
        self.error.set(None);
    }

    pub fn submit_location(&self) {
        let Some(vehicle) = self.location_target.get_untracked() else {
            return;
        };
        if self.location_action.pending().get_untracked() {
            return;
        }
        match self.location_form.with_untracked(|f| f.to_request(now_millis())) {
            Ok(request) => self.location_action.dispatch((vehicle.id, request)),
            Err(err) => self.error.set(Some(err)),
        }
    }

    pub fn open_readings(&self, vehicle: Vehicle) {
        self.readings_form.set(ReadingsForm::from_vehicle(&vehicle));
        self.readings_target.set(Some(vehicle));
        self.error.set(None);
    }

    pub fn submit_readings(&self) {
        let Some(vehicle) = self.readings_target.get_untracked() else {
            return;
        };
        if self.readings_action.pending().get_untracked() {
            return;
        }
        match self.readings_form.with_untracked(ReadingsForm::to_requests) {
            Ok((mileage, fuel)) => self.readings_action.dispatch((vehicle.id, mileage, fuel)),
            Err(err) => self.error.set(Some(err)),
        }
    }
}

/// Puts a vehicle the service accepted into the cached registry list in place of the old row.
fn record_vehicle(queries: &QueryClient, vehicle: &Vehicle) {
    let key = keys::registry_vehicles();
    let Some(mut list) = queries.get_data::<Vec<Vehicle>>(&key) else {
        return;
    };
    if let Some(row) = list.iter_mut().find(|row| row.id == vehicle.id) {
        *row = vehicle.clone();
        queries.set_data(&key, list);
    }
}

/// Runs one registry write. An accepted write is recorded in the cache and invalidates
/// every registry read.
pub async fn write_vehicle<Fut>(queries: &QueryClient, write: Fut) -> Result<Vehicle, ApiError>
where
    Fut: Future<Output = Result<Vehicle, ApiError>>,
{
    let write = async {
        let vehicle = write.await?;
        record_vehicle(queries, &vehicle);
        Ok(vehicle)
    };
    queries.mutate(write, &[keys::registry_vehicles()]).await
}

/// Mileage first, then fuel. Each accepted write invalidates on its own, so a rejected
/// fuel level still leaves the new mileage visible.
pub async fn save_readings(
    api: &VehicleApi,
    queries: &QueryClient,
    (id, mileage, fuel): ReadingsUpdate,
) -> Result<Vehicle, ApiError> {
    write_vehicle(queries, api.update_mileage(&id, &mileage)).await?;
    write_vehicle(queries, api.update_fuel(&id, &fuel)).await
}

pub fn use_registry_view_model() -> RegistryViewModel {
    let api = use_api().vehicles;
    let queries = use_query_client();

    let list_api = api.clone();
    let vehicles = use_query(keys::registry_vehicles(), move || {
        let api = list_api.clone();
        async move { api.list_vehicles().await }
    });

    let create_api = api.clone();
    let create_action = use_mutation(
        move |request: &CreateVehicleRequest| {
            let api = create_api.clone();
            let request = request.clone();
            async move { api.create_vehicle(&request).await }
        },
        vec![keys::registry_vehicles()],
    );

    let location_api = api.clone();
    let location_queries = queries.clone();
    let location_action = leptos::create_action(move |(id, request): &LocationUpdate| {
        let api = location_api.clone();
        let queries = location_queries.clone();
        let id = id.clone();
        let request = request.clone();
        async move { write_vehicle(&queries, api.update_location(&id, &request)).await }
    });

    let status_api = api.clone();
    let status_queries = queries.clone();
    let status_action = leptos::create_action(move |(id, status): &StatusUpdate| {
        let api = status_api.clone();
        let queries = status_queries.clone();
        let id = id.clone();
        let request = UpdateStatusRequest { status: *status };
        async move { write_vehicle(&queries, api.update_status(&id, &request)).await }
    });

    let readings_action = leptos::create_action(move |update: &ReadingsUpdate| {
        let api = api.clone();
        let queries = queries.clone();
        let update = update.clone();
        async move { save_readings(&api, &queries, update).await }
    });

    let show_create = create_rw_signal(false);
    let create_form = create_rw_signal(CreateVehicleForm::default());
    let location_target = create_rw_signal(None::<Vehicle>);
    let location_form = create_rw_signal(LocationForm::default());
    let readings_target = create_rw_signal(None::<Vehicle>);
    let readings_form = create_rw_signal(ReadingsForm::default());
    let error = create_rw_signal(None::<ApiError>);

    create_effect(move |_| {
        if let Some(result) = create_action.value().get() {
            match result {
                Ok(vehicle) => {
                    log::info!("created vehicle {}", vehicle.id);
                    show_create.set(false);
                    create_form.set(CreateVehicleForm::default());
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });
    create_effect(move |_| {
        if let Some(result) = location_action.value().get() {
            match result {
                Ok(_) => location_target.set(None),
                Err(err) => error.set(Some(err)),
            }
        }
    });
    create_effect(move |_| {
        if let Some(result) = readings_action.value().get() {
            match result {
                Ok(_) => readings_target.set(None),
                Err(err) => error.set(Some(err)),
            }
        }
    });
    create_effect(move |_| {
        if let Some(Err(err)) = status_action.value().get() {
            error.set(Some(err));
        }
    });

    RegistryViewModel {
        vehicles,
        show_create,
        create_form,
        location_target,
        location_form,
        readings_target,
        readings_form,
        error,
        create_action,
        location_action,
        status_action,
        readings_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::{fixtures::vehicle_json, mock::*};
    use crate::api::Credentials;
    use crate::query::{provide_query_client, QueryOptions};
    use crate::test_support::ssr::with_runtime;
    use crate::utils::storage::MemoryTokens;
    use futures::future::LocalBoxFuture;
    use serde_json::json;
    use std::rc::Rc;
    use tokio::task::LocalSet;

    fn vehicle(id: &str) -> Vehicle {
        serde_json::from_value(vehicle_json(id, "available", 1)).unwrap()
    }

    #[test]
    fn invalid_create_form_surfaces_error_without_dispatch() {
        with_runtime(|| {
            provide_query_client(QueryClient::new());
            let vm = use_registry_view_model();
            vm.toggle_create();
            vm.submit_create();
            assert!(vm.show_create.get());
            assert_eq!(vm.error.get().map(|e| e.error), Some("VIN is required".into()));
            assert_eq!(vm.create_action.version().get(), 0);
        });
    }

    #[test]
    fn opening_location_modal_prefills_current_position() {
        with_runtime(|| {
            provide_query_client(QueryClient::new());
            let vm = use_registry_view_model();
            vm.open_location(vehicle("3"));
            assert_eq!(vm.location_target.get().map(|v| v.id), Some("3".into()));
            let form = vm.location_form.get();
            assert_eq!(form.latitude, "10.7769");
            assert_eq!(form.longitude, "106.7009");
        });
    }

    #[test]
    fn invalid_readings_keep_modal_open() {
        with_runtime(|| {
            provide_query_client(QueryClient::new());
            let vm = use_registry_view_model();
            vm.open_readings(vehicle("3"));
            vm.readings_form.update(|form| form.mileage = "-4".into());
            vm.submit_readings();
            assert!(vm.readings_target.get().is_some());
            assert_eq!(
                vm.error.get().map(|e| e.error),
                Some("Mileage cannot be negative".into())
            );
        });
    }
    #[tokio::test]
    async fn rejected_fuel_still_invalidates_accepted_mileage() {
        LocalSet::new()
            .run_until(async {
                let server = MockServer::start_async().await;
                server.mock(|when, then| {
                    when.method(GET).path("/api/vehicle/vehicles");
                    then.status(200)
                        .json_body(json!({ "vehicles": [vehicle_json("1", "available", 1)] }));
                });
                server.mock(|when, then| {
                    when.method(GET).path("/api/vehicle/vehicles");
                    then.status(200)
                        .json_body(json!({ "vehicles": [vehicle_json("1", "available", 2)] }));
                });
                server.mock(|when, then| {
                    when.method(PATCH).path("/api/vehicle/vehicles/1/mileage");
                    then.status(200).json_body(vehicle_json("1", "available", 2));
                });
                server.mock(|when, then| {
                    when.method(PATCH).path("/api/vehicle/vehicles/1/fuel");
                    then.status(400)
                        .json_body(json!({ "message": "fuel level out of range" }));
                });
                let credentials = Credentials::new(Rc::new(MemoryTokens::with_token("tok-1")));
                let api = VehicleApi::new_with_base_url(server.url("/api/vehicle"), credentials);
                let queries = QueryClient::with_spawner(
                    QueryOptions::default(),
                    Rc::new(|fut: LocalBoxFuture<'static, ()>| {
                        tokio::task::spawn_local(fut);
                    }),
                );
                let list = {
                    let api = api.clone();
                    move || {
                        let api = api.clone();
                        async move { api.list_vehicles().await }
                    }
                };

                let before = queries
                    .fetch(keys::registry_vehicles(), list.clone())
                    .await
                    .unwrap();
                let err = save_readings(
                    &api,
                    &queries,
                    (
                        "1".into(),
                        UpdateMileageRequest { mileage: 1600.0 },
                        UpdateFuelRequest { fuel_level: 140.0 },
                    ),
                )
                .await
                .unwrap_err();
                let recorded = queries
                    .get_data::<Vec<Vehicle>>(&keys::registry_vehicles())
                    .unwrap();
                let after = queries.fetch(keys::registry_vehicles(), list).await.unwrap();

                assert_eq!(before[0].version, 1);
                assert_eq!(err.code, "VALIDATION_ERROR");
                assert_eq!(recorded[0].version, 2);
                assert_eq!(after[0].version, 2);
                assert_eq!(server.hits(&PATCH, "/api/vehicle/vehicles/1/mileage"), 1);
                assert_eq!(server.hits(&GET, "/api/vehicle/vehicles"), 2);
            })
            .await;
    }
}
