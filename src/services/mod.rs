// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod catalog_client;
pub mod controller;

pub use catalog_client::*;
pub use controller::*;
