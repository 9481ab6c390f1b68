pub mod catalog;
pub mod client;
pub mod endpoints;
pub mod models;
