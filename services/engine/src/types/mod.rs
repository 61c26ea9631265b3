pub mod bet_types;
pub mod bolao_types;
pub mod cassino_types;
pub mod match_types;
pub mod store_types;
pub mod wallet_types;
