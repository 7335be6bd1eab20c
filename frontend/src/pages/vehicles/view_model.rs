use crate::api::{use_api, TrackedVehicle};
use crate::query::{keys, use_query, QueryHandle};

#[derive(Clone, Copy)]
pub struct TrackedVehiclesViewModel {
    pub vehicles: QueryHandle<Vec<TrackedVehicle>>,
}

pub fn use_tracked_vehicles_view_model() -> TrackedVehiclesViewModel {
    let api = use_api().tracking;
    let vehicles = use_query(keys::tracked_vehicles(), move || {
        let api = api.clone();
        async move { api.list_vehicles().await }
    });
    TrackedVehiclesViewModel { vehicles }
}
