pub mod auction;
pub mod audit;
pub mod auth;
pub mod bidding;
pub mod closing;
pub mod config;
pub mod database;
pub mod editing;
pub mod error;
pub mod handlers;
pub mod query;
