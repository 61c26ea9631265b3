pub mod admin_types;
pub mod auth_types;
pub mod bet_types;
pub mod bolao_types;
pub mod cassino_types;
pub mod store_types;
