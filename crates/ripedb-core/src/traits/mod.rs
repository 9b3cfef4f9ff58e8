//! Core traits for the reconciler
//!
//! This module defines the abstract interfaces that collaborators must follow.
//!
//! - [`RegistryClient`]: Read and write objects in the registry database

pub mod registry_client;

pub use registry_client::RegistryClient;
