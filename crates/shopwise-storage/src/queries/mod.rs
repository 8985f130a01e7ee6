// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for the catalog and conversation tables.

pub mod conversations;
pub mod products;
