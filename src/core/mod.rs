//! Core primitives: activation store, registry, config, stubs, SQLite.

pub mod activator;
pub mod config;
pub mod db;
pub mod error;
pub mod generator;
pub mod migrations;
pub mod module;
pub mod naming;
pub mod registry;
pub mod stubs;
pub mod time;
