//! Core data models for the Settlement Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employment_fact;
mod money;
mod settlement_result;

pub use employment_fact::{
    EmploymentFact, MAX_ACCRUED_LEAVE_PERIODS, MAX_MONETARY_AMOUNT, MAX_WORKED_DAYS_IN_MONTH,
    TerminationReason,
};
pub use money::round_currency;
pub use settlement_result::{
    AuditStep, AuditTrace, AuditWarning, LineItemCategory, ProrationSummary, SettlementLineItem,
    SettlementResult, SettlementStatus, WithholdingBreakdown,
};
