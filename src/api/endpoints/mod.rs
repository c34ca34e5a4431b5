//! API endpoint handlers.
//!
//! Each module corresponds to a front-end screen or feature.
//! Handlers stay thin and call into the store and pipeline modules.

pub mod appointments;
pub mod ask;
pub mod chat;
pub mod collection;
pub mod contacts;
pub mod health;
pub mod language;
pub mod media;
pub mod medications;
pub mod profile;
pub mod wellness;
