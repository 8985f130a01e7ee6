// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Shopwise chat service.
//!
//! Routes:
//! - `POST /v1/chat` runs one chat turn
//! - `GET /v1/conversations/history` lists logged messages for a session
//! - `GET /health` reports liveness without authentication

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use server::{GatewayState, HealthState, build_router, start_server};
