//! Domain layer: money, prices, payment plans, ledger records and the ports
//! the application talks to.

pub mod intent;
pub mod money;
pub mod payment;
pub mod ports;
pub mod pricing;
pub mod property;
pub mod transaction;
