//! Storefront agent - rule-based intent routing and query handling
//!
//! This crate is the "brain" of the shopmate storefront:
//! - Classifies free-text queries into a closed intent set (`classifier`)
//! - Pulls structured parameters out of the raw text (`extract`)
//! - Executes per-intent business rules over the session state (`handlers`)
//! - Searches, recommends, cross-sells, and compares products (`search`)
//! - Tallies historical intents for the admin dashboard (`insights`, `admin`)
//!
//! # Architecture
//!
//! Every turn follows the same constrained path:
//! 1. **Classification** (`classifier`) - ordered keyword rules, first match wins
//! 2. **Extraction** (inline per handler) - plain substring/regex parameter pulls
//! 3. **Handling** (`handlers`, `search`) - reads/mutates the session, returns text
//! 4. **Logging** (`runtime`) - the turn lands in the append-only query log
//!
//! # Safety Principle
//!
//! Handlers never terminate the session. Recoverable failures render as
//! customer-facing messages, and panics are caught at the dispatch boundary
//! and converted to an apology response.

pub mod admin;
pub mod classifier;
pub mod extract;
pub mod handlers;
pub mod insights;
pub mod runtime;
pub mod search;

pub use classifier::{classify, Intent};
pub use runtime::{AdminTurn, Agent, Turn};
