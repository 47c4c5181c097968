//! Application layer containing the payment flow orchestration.
//!
//! `PaymentService` is the single entry point used by the HTTP handlers and
//! the CLI. It only talks to storage and the payment provider through the
//! domain ports.

pub mod payments;
