//! Service-time proration.
//!
//! Converts an admission/termination date pair into whole months and whole
//! years of service under the 15-day rule, and maps unjustified absences to
//! vacation-day entitlements through an explicit step table.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::ProrationPolicy;
use crate::models::{AuditStep, ProrationSummary};

/// Minimum length of a trailing partial month for it to count as a month.
pub const PARTIAL_MONTH_THRESHOLD_DAYS: u32 = 15;

/// Vacation days owed when absences do not reduce the entitlement.
pub const FULL_VACATION_DAYS: u32 = 30;

/// One row of the absence step table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VacationStep {
    /// Highest absence count covered by this row.
    pub max_absences: u32,
    /// Vacation days owed for this row.
    pub vacation_days: u32,
}

/// Vacation days by unjustified absences (CLT art. 130), ascending.
///
/// Absence counts above the last row forfeit the entitlement.
pub const VACATION_ABSENCE_STEPS: [VacationStep; 4] = [
    VacationStep {
        max_absences: 5,
        vacation_days: 30,
    },
    VacationStep {
        max_absences: 14,
        vacation_days: 24,
    },
    VacationStep {
        max_absences: 23,
        vacation_days: 18,
    },
    VacationStep {
        max_absences: 32,
        vacation_days: 12,
    },
];

/// Returns the vacation days owed for an acquisition period with `absences`
/// unjustified absences.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::vacation_days_for_absences;
///
/// assert_eq!(vacation_days_for_absences(0), 30);
/// assert_eq!(vacation_days_for_absences(6), 24);
/// assert_eq!(vacation_days_for_absences(33), 0);
/// ```
pub fn vacation_days_for_absences(absences: u32) -> u32 {
    VACATION_ABSENCE_STEPS
        .iter()
        .find(|step| absences <= step.max_absences)
        .map(|step| step.vacation_days)
        .unwrap_or(0)
}

/// Unjustified absence counts for the two kinds of acquisition period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absences {
    /// Absences in the current, incomplete period.
    pub prorated: u32,
    /// Absences in the overdue periods.
    pub accrued: u32,
}

/// Calendar months and leftover days between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSpan {
    /// Complete calendar months.
    pub months: u32,
    /// Days after the last complete month.
    pub trailing_days: u32,
}

/// Splits the period between two dates into complete months and leftover days.
///
/// Month arithmetic clamps to month end, so 31 January plus one month is the
/// last day of February. Returns `None` unless `termination > admission`.
pub fn service_span(admission: NaiveDate, termination: NaiveDate) -> Option<ServiceSpan> {
    if termination <= admission {
        return None;
    }

    let raw_months = (termination.year() - admission.year()) * 12 + termination.month() as i32
        - admission.month() as i32;
    let mut months = raw_months.max(0) as u32;

    let anchor = loop {
        let candidate = admission.checked_add_months(Months::new(months))?;
        if candidate <= termination || months == 0 {
            break candidate;
        }
        months -= 1;
    };

    let trailing_days = (termination - anchor).num_days().max(0) as u32;

    Some(ServiceSpan {
        months,
        trailing_days,
    })
}

/// Returns true if the trailing partial month counts as a whole month.
pub fn counts_partial_month(
    span: &ServiceSpan,
    termination: NaiveDate,
    policy: ProrationPolicy,
) -> bool {
    match policy {
        ProrationPolicy::TrailingDayCount => span.trailing_days >= PARTIAL_MONTH_THRESHOLD_DAYS,
        ProrationPolicy::DayOfMonth => {
            span.trailing_days > 0 && termination.day() >= PARTIAL_MONTH_THRESHOLD_DAYS
        }
    }
}

/// The result of prorating a service period.
#[derive(Debug, Clone)]
pub struct ProrationResult {
    /// False when termination was not after admission.
    pub valid_range: bool,
    /// Month, year and vacation-day counts; all zero for an invalid range.
    pub summary: ProrationSummary,
    /// Audit steps recording the proration.
    pub audit_steps: Vec<AuditStep>,
}

/// Prorates the service period and the vacation entitlements.
///
/// # Arguments
///
/// * `admission` - First day of employment
/// * `termination` - Last day of employment
/// * `absences` - Unjustified absences per kind of acquisition period
/// * `policy` - The 15-day rule variant
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::{prorate, Absences};
/// use settlement_engine::config::ProrationPolicy;
/// use chrono::NaiveDate;
///
/// let result = prorate(
///     NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     Absences::default(),
///     ProrationPolicy::TrailingDayCount,
///     1,
/// );
/// assert_eq!(result.summary.whole_months, 24);
/// assert_eq!(result.summary.whole_years, 2);
/// assert_eq!(result.summary.vacation_days_entitlement, 30);
/// ```
pub fn prorate(
    admission: NaiveDate,
    termination: NaiveDate,
    absences: Absences,
    policy: ProrationPolicy,
    step_number: u32,
) -> ProrationResult {
    let Some(span) = service_span(admission, termination) else {
        let audit_step = AuditStep {
            step_number,
            rule_id: "service_proration".to_string(),
            rule_name: "Service Proration".to_string(),
            legal_basis: "Lei 4.090/1962 art. 1, §2; CLT art. 146".to_string(),
            input: serde_json::json!({
                "admission_date": admission.to_string(),
                "termination_date": termination.to_string(),
                "policy": policy.as_str()
            }),
            output: serde_json::json!({
                "valid_range": false,
                "whole_months": 0,
                "vacation_days_entitlement": 0
            }),
            reasoning: format!(
                "Termination {} is not after admission {}, no entitlement",
                termination, admission
            ),
        };

        return ProrationResult {
            valid_range: false,
            summary: ProrationSummary::default(),
            audit_steps: vec![audit_step],
        };
    };

    let partial_counts = counts_partial_month(&span, termination, policy);
    let whole_months = span.months + u32::from(partial_counts);
    let whole_years = span.months / 12;

    let proration_step = AuditStep {
        step_number,
        rule_id: "service_proration".to_string(),
        rule_name: "Service Proration".to_string(),
        legal_basis: "Lei 4.090/1962 art. 1, §2; CLT art. 146".to_string(),
        input: serde_json::json!({
            "admission_date": admission.to_string(),
            "termination_date": termination.to_string(),
            "policy": policy.as_str()
        }),
        output: serde_json::json!({
            "valid_range": true,
            "complete_months": span.months,
            "trailing_days": span.trailing_days,
            "partial_month_counted": partial_counts,
            "whole_months": whole_months,
            "whole_years": whole_years
        }),
        reasoning: format!(
            "{} complete months and {} trailing days; partial month {} under {} rule, {} whole months",
            span.months,
            span.trailing_days,
            if partial_counts { "counted" } else { "not counted" },
            policy.as_str(),
            whole_months
        ),
    };

    let vacation_days_entitlement = vacation_days_for_absences(absences.prorated);
    let accrued_vacation_days = vacation_days_for_absences(absences.accrued);

    let vacation_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "vacation_absence_reduction".to_string(),
        rule_name: "Vacation Absence Reduction".to_string(),
        legal_basis: "CLT art. 130".to_string(),
        input: serde_json::json!({
            "unjustified_absences_prorated": absences.prorated,
            "unjustified_absences_accrued": absences.accrued
        }),
        output: serde_json::json!({
            "vacation_days_entitlement": vacation_days_entitlement,
            "accrued_vacation_days": accrued_vacation_days
        }),
        reasoning: format!(
            "{} absences in current period give {} days; {} absences in overdue periods give {} days",
            absences.prorated, vacation_days_entitlement, absences.accrued, accrued_vacation_days
        ),
    };

    ProrationResult {
        valid_range: true,
        summary: ProrationSummary {
            whole_months,
            whole_years,
            trailing_days: span.trailing_days,
            vacation_days_entitlement,
            accrued_vacation_days,
            notice_days: 0,
        },
        audit_steps: vec![proration_step, vacation_step],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn prorate_trailing(admission: NaiveDate, termination: NaiveDate) -> ProrationResult {
        prorate(
            admission,
            termination,
            Absences::default(),
            ProrationPolicy::TrailingDayCount,
            1,
        )
    }

    #[test]
    fn test_exact_two_years() {
        let result = prorate_trailing(date(2022, 1, 1), date(2024, 1, 1));

        assert!(result.valid_range);
        assert_eq!(result.summary.whole_months, 24);
        assert_eq!(result.summary.whole_years, 2);
        assert_eq!(result.summary.trailing_days, 0);
        assert_eq!(result.audit_steps.len(), 2);
        assert_eq!(result.audit_steps[0].rule_id, "service_proration");
        assert_eq!(result.audit_steps[1].step_number, 2);
    }

    #[test]
    fn test_trailing_partial_of_15_days_counts() {
        let result = prorate_trailing(date(2023, 1, 1), date(2023, 3, 16));
        assert_eq!(result.summary.trailing_days, 15);
        assert_eq!(result.summary.whole_months, 3);
    }

    #[test]
    fn test_trailing_partial_of_14_days_does_not_count() {
        let result = prorate_trailing(date(2023, 1, 1), date(2023, 3, 15));
        assert_eq!(result.summary.trailing_days, 14);
        assert_eq!(result.summary.whole_months, 2);
    }

    #[test]
    fn test_policies_disagree_on_late_start_early_end() {
        // 1 month and 20 days, ending on the 10th
        let admission = date(2023, 3, 20);
        let termination = date(2023, 5, 10);

        let trailing = prorate(
            admission,
            termination,
            Absences::default(),
            ProrationPolicy::TrailingDayCount,
            1,
        );
        let day_of_month = prorate(
            admission,
            termination,
            Absences::default(),
            ProrationPolicy::DayOfMonth,
            1,
        );

        assert_eq!(trailing.summary.whole_months, 2);
        assert_eq!(day_of_month.summary.whole_months, 1);
    }

    #[test]
    fn test_day_of_month_ignores_exact_month_boundary() {
        let result = prorate(
            date(2022, 1, 20),
            date(2024, 1, 20),
            Absences::default(),
            ProrationPolicy::DayOfMonth,
            1,
        );
        assert_eq!(result.summary.whole_months, 24);
    }

    #[test]
    fn test_day_of_month_counts_late_termination_day() {
        let result = prorate(
            date(2023, 1, 10),
            date(2023, 4, 18),
            Absences::default(),
            ProrationPolicy::DayOfMonth,
            1,
        );
        assert_eq!(result.summary.whole_months, 4);
    }

    #[test]
    fn test_month_end_clamping() {
        let span = service_span(date(2024, 1, 31), date(2024, 2, 29)).unwrap();
        assert_eq!(span.months, 1);
        assert_eq!(span.trailing_days, 0);

        let span = service_span(date(2024, 1, 31), date(2024, 3, 30)).unwrap();
        assert_eq!(span.months, 1);
        assert_eq!(span.trailing_days, 30);
    }

    #[test]
    fn test_same_day_is_invalid() {
        let result = prorate_trailing(date(2024, 1, 1), date(2024, 1, 1));

        assert!(!result.valid_range);
        assert_eq!(result.summary, ProrationSummary::default());
        assert_eq!(result.audit_steps.len(), 1);
        assert_eq!(result.audit_steps[0].output["valid_range"], false);
    }

    #[test]
    fn test_inverted_dates_are_invalid() {
        assert!(service_span(date(2024, 5, 1), date(2024, 1, 1)).is_none());
        assert!(!prorate_trailing(date(2024, 5, 1), date(2024, 1, 1)).valid_range);
    }

    #[test]
    fn test_whole_years_ignore_partial_month() {
        let result = prorate_trailing(date(2020, 6, 1), date(2023, 5, 25));
        assert_eq!(result.summary.whole_years, 2);
        assert_eq!(result.summary.whole_months, 36);
    }

    #[test]
    fn test_vacation_step_table_boundaries() {
        assert_eq!(vacation_days_for_absences(5), 30);
        assert_eq!(vacation_days_for_absences(6), 24);
        assert_eq!(vacation_days_for_absences(14), 24);
        assert_eq!(vacation_days_for_absences(15), 18);
        assert_eq!(vacation_days_for_absences(23), 18);
        assert_eq!(vacation_days_for_absences(24), 12);
        assert_eq!(vacation_days_for_absences(32), 12);
        assert_eq!(vacation_days_for_absences(33), 0);
        assert_eq!(vacation_days_for_absences(40), 0);
    }

    #[test]
    fn test_step_table_is_ascending() {
        for pair in VACATION_ABSENCE_STEPS.windows(2) {
            assert!(pair[0].max_absences < pair[1].max_absences);
            assert!(pair[0].vacation_days > pair[1].vacation_days);
        }
        assert_eq!(VACATION_ABSENCE_STEPS[0].vacation_days, FULL_VACATION_DAYS);
    }

    #[test]
    fn test_absence_kinds_are_independent() {
        let result = prorate(
            date(2022, 1, 1),
            date(2024, 1, 1),
            Absences {
                prorated: 40,
                accrued: 10,
            },
            ProrationPolicy::TrailingDayCount,
            1,
        );
        assert_eq!(result.summary.vacation_days_entitlement, 0);
        assert_eq!(result.summary.accrued_vacation_days, 24);
        assert_eq!(result.summary.whole_months, 24);
    }
}
