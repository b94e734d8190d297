//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod account_service;
pub mod chart_service;
pub mod demo_data;
pub mod entry_service;
