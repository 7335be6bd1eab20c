pub mod login;
pub mod vehicle_detail;
pub mod vehicle_registry;
pub mod vehicles;
