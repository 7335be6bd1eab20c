pub mod create_form;
pub mod modals;
pub mod table;
