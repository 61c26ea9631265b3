pub mod admin_controller;
pub mod auth_controller;
pub mod bet_controller;
pub mod bolao_controller;
pub mod cassino_controller;
pub mod match_controller;
pub mod store_controller;
pub mod wallet_controller;
