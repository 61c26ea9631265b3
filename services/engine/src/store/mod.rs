pub mod bets;
pub mod bolao;
pub mod cassino;
pub mod matches;
pub mod promo;
pub mod resolver;
pub mod settings;
pub mod shop;
pub mod wallet;
