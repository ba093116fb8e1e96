//! # Back-Office Library
//!
//! This library provides the core functionality for the property-management
//! back-office service, including handlers, models, repositories and server
//! configuration.

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod server;
pub mod storage;
pub mod telemetry;
pub use migration;
