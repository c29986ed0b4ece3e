pub mod countries_client;
pub mod search;
pub mod views;
