use crate::api::{use_api, HistoryPage, TrackedVehicle, VehicleChangeHistory};
use crate::query::{keys, use_query, QueryHandle};

#[derive(Clone, Copy)]
pub struct VehicleDetailViewModel {
    pub vehicle: QueryHandle<TrackedVehicle>,
}

/// Built once per vehicle id; a route change to another id builds a new one.
pub fn use_vehicle_detail_view_model(id: String) -> VehicleDetailViewModel {
    let api = use_api().tracking;
    let vehicle = use_query(keys::tracked_vehicle(&id), move || {
        let api = api.clone();
        let id = id.clone();
        async move { api.get_vehicle(&id).await }
    });
    VehicleDetailViewModel { vehicle }
}

pub fn use_vehicle_history(id: String, page: HistoryPage) -> QueryHandle<VehicleChangeHistory> {
    let api = use_api().tracking;
    use_query(keys::vehicle_history(&id, page), move || {
        let api = api.clone();
        let id = id.clone();
        async move { api.get_history(&id, page).await }
    })
}
