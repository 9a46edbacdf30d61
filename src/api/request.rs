//! Request types for the Settlement Engine API.
//!
//! Both `/calculate` and `/calculate/csv` accept the same JSON body.

use serde::{Deserialize, Serialize};

use crate::config::CalculationPolicy;
use crate::models::EmploymentFact;

/// Request body for the calculation endpoints.
///
/// # Example
///
/// ```
/// use settlement_engine::api::CalculationRequest;
///
/// let request: CalculationRequest = serde_json::from_str(r#"{
///     "fact": {
///         "monthly_salary": "3000.00",
///         "admission_date": "2022-01-01",
///         "termination_date": "2024-01-01",
///         "termination_reason": "without_cause"
///     }
/// }"#).unwrap();
/// assert!(request.policy.is_none());
/// assert_eq!(request.fact.dependents_count, 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employment facts to settle.
    pub fact: EmploymentFact,
    /// Overrides the configured default policy when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<CalculationPolicy>,
}

impl CalculationRequest {
    /// Returns the request policy, or `default` when none was given.
    pub fn policy_or(&self, default: &CalculationPolicy) -> CalculationPolicy {
        self.policy.unwrap_or(*default)
    }
}
