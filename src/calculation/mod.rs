//! Calculation logic for the Settlement Engine.
//!
//! This module contains the settlement pipeline: service proration with the
//! 15-day rule and the absence step table, one calculator per entitlement
//! (salary balance, 13th salary, vacation, indemnified notice, severance
//! fund), progressive bracket withholding, and aggregation into a
//! [`crate::models::SettlementResult`].

mod aggregation;
mod brackets;
mod entitlements;
mod notice_period;
mod proration;
mod salary_balance;
mod settlement;
mod severance_fund;
mod thirteenth_salary;
mod vacation;
mod withholding;

pub use aggregation::aggregate;
pub use brackets::{BracketLookup, apply_brackets, lookup_bracket};
pub use entitlements::{EntitlementsResult, compute_entitlements};
pub use notice_period::{
    BASE_NOTICE_DAYS, MAX_ADDITIONAL_NOTICE_DAYS, MAX_NOTICE_DAYS, NOTICE_DAYS_PER_YEAR,
    NoticePeriodResult, calculate_notice_period, notice_days_for_tenure,
};
pub use proration::{
    Absences, FULL_VACATION_DAYS, PARTIAL_MONTH_THRESHOLD_DAYS, ProrationResult, ServiceSpan,
    VACATION_ABSENCE_STEPS, VacationStep, counts_partial_month, prorate, service_span,
    vacation_days_for_absences,
};
pub use salary_balance::{
    COMMERCIAL_MONTH_DAYS, SalaryBalanceResult, calculate_salary_balance, daily_rate,
};
pub use settlement::calculate_settlement;
pub use severance_fund::{
    SEVERANCE_FUND_DEPOSIT_RATE, SEVERANCE_FUND_PENALTY_RATE, SeveranceFundResult,
    calculate_severance_fund,
};
pub use thirteenth_salary::{MONTHS_PER_YEAR, ThirteenthSalaryResult, calculate_thirteenth_salary};
pub use vacation::{
    DOUBLED_VACATION_MULTIPLIER, VACATION_BONUS_DIVISOR, VacationInput, VacationResult,
    calculate_vacation,
};
pub use withholding::{WithholdingResult, calculate_withholdings};
