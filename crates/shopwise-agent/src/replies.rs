// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed reply texts.

/// Classification itself failed.
pub const PROCESSING_ERROR: &str =
    "Sorry, there was an error processing your request. Please try again.";

/// A handler failed unexpectedly.
pub const INTERNAL_ERROR: &str = "Sorry, I encountered an error. Please try again in a moment.";

/// The product store could not be queried.
pub const SEARCH_ERROR: &str =
    "Sorry, there was an error searching for products. Please try again.";

/// The message was empty.
pub const EMPTY_MESSAGE: &str = "Please type a message so I can help you.";

/// General question with no matching products.
pub const GENERAL_HELP: &str = "I'm here to help you find products and check what's in stock. \
     Try asking about a specific item, for example \"Do you have necklaces in stock?\"";

/// Browsing question with no matching products.
pub const BROWSE_HELP: &str = "You can ask me about necklaces, earrings, bracelets, rings, \
     watches, bags, shoes, dresses and shirts. What are you looking for today?";

pub const ORDER_STATUS: &str = "I can help with your order. Please share your order number and \
     we'll check its status for you.";

pub const RECOMMENDATION: &str = "I'd be happy to recommend something! Tell me what you're \
     shopping for and your budget, and I'll suggest a few options.";
