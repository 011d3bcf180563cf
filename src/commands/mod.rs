//! CLI command handlers. Each handler takes its collaborators (config,
//! registry, activation store) explicitly; there is no ambient lookup.

pub mod lifecycle;
pub mod make;
pub mod migrate;
pub mod reinstall;
pub mod seed;
