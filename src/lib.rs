//! A single-user retail transaction simulator: product catalog, shopping cart,
//! payment instruments, and an order ledger, driven by a menu-based session.
//!
//! The interesting part is the checkout engine in [`application::checkout`]:
//! it quotes a cart against current catalog prices, collects partial payments
//! across heterogeneous instruments until the balance settles, then commits
//! stock and archives the order. Storage sits behind async ports so the
//! in-memory adapters can be swapped without touching the engine.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
