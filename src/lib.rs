//! Termination settlement calculator for Brazilian labor law (CLT).
//!
//! Given the facts of an employment relationship, this crate computes the
//! severance line items owed at termination (salary balance, prorated 13th
//! salary, vacation and its one-third bonus, indemnified notice, severance
//! fund), withholds social security and income tax with versioned
//! progressive rate tables, and produces a fully audited settlement.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
