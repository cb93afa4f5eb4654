//! MedTrain HTTP API Service.
//!
//! This crate provides the HTTP API for the medical-device training catalog:
//!
//! - Categories and training cards
//! - Likes, comments, and catalog statistics
//! - Media uploads and static file serving
//! - An AI assistant that answers questions about a card
//!
//! # Admin sessions
//!
//! `POST /api/admin/login` exchanges the shared admin password for an opaque
//! session token. Catalog mutations only require that token when
//! `REQUIRE_ADMIN_SESSION` is enabled.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers are async for the router even when they never await

pub mod assistant;
pub mod auth;
pub mod config;
pub mod crypto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use assistant::{AssistantClient, AssistantError, CardContext};
pub use auth::{AdminSession, SessionGate};
pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
