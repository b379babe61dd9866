//! Client-side services
//!
//! Business logic above the transport: the session store, role gating, the
//! listing state machine, checkout, and local form validation.

pub mod checkout;
pub mod listing;
pub mod roles;
pub mod session;
pub mod validate;
