//! Folio - backend for a personal portfolio site
//!
//! Records visitor interactions (section views and outbound link clicks),
//! accepts contact messages and exposes both to a password-protected admin API.
//!
//! # Architecture
//! - `tracking`: interaction tracking core (classification, dedup, client metadata)
//! - `storage`: SeaORM backends for interactions and messages
//! - `services`: contact message validation and persistence
//! - `api`: HTTP handlers and middleware (passive tracking gate, admin auth)
//! - `interfaces`: command-line interface
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod tracking;
pub mod utils;
