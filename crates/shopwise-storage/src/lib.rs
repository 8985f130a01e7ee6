// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for Shopwise.
//!
//! Provides the product catalog read by the chat pipeline and the
//! conversation log written after each turn. A single `tokio-rusqlite`
//! background connection serializes all access; the schema is managed by
//! embedded refinery migrations.

pub mod adapter;
pub mod database;
pub mod import;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
pub use import::{CatalogImport, ImportSummary, ImportedProduct};
