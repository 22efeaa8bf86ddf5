//! Railsim core — shared types for the dual-rail settlement simulator.
//!
//! This crate provides:
//! - [`Sat`] and [`SimTime`] — the currency and simulated-time units.
//! - [`NodeId`], [`ChannelId`], [`PaymentId`] — arena handles.
//! - [`Payment`] and [`PaymentBook`] — the simulation-owned payment records.
//! - [`EventClock`] — the single-threaded discrete-event clock that drives
//!   deferred payment completion.
//! - [`SimConfig`] — simulation parameters.

pub mod clock;
pub mod config;
pub mod types;

pub use clock::EventClock;
pub use config::SimConfig;
pub use types::{
    ChannelId, NodeId, Payment, PaymentBook, PaymentId, PaymentMethod, Sat, SimTime,
};
