//! Teller CLI - interactive terminal front end
//!
//! Wires the ledger, audit log and snapshot store into a menu-driven
//! banking session.

pub mod context;
pub mod menu;
pub mod prompt;
pub mod view;

pub use context::AppContext;
