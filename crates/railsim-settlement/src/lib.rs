//! Railsim settlement layer.
//!
//! Two rails over shared [`Payment`] records:
//! - [`send_payment`] — atomic multi-hop channel settlement with
//!   HTLC-style backward fee escalation.
//! - [`Mainchain`] — base-ledger settlement with a fixed fee and
//!   confirmation delay.
//!
//! Both rails mutate balances synchronously at call time and defer only
//! the payment's completion timestamp to the event clock.
//!
//! [`Payment`]: railsim_core::Payment

pub mod error;
pub mod mainchain;
pub mod offchain;

pub use error::PaymentError;
pub use mainchain::Mainchain;
pub use offchain::{send_payment, OFFCHAIN_HOP_DELAY_MS};
