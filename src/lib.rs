//! Console dashboard over the merchant payments REST API

pub mod api;
pub mod commands;
pub mod config;
pub mod fetch;
pub mod models;
pub mod notify;
pub mod query;
pub mod services;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
