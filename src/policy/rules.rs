//! Policy checks and per-resource policies.

use crate::core::{ComplianceError, ComplianceResult};
use crate::policy::verdict::{Expected, Verdict, VerdictValue};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Debug;

/// A predicate that can appear in a resource policy.
pub trait Check: Debug + Clone {
    /// Returns `true` if `expected` has the shape of the value this check
    /// produces.
    fn accepts(&self, expected: &Expected) -> bool;

    /// Checks the predicate's own parameters.
    ///
    /// Returns a description of the problem when the check can never be
    /// meaningfully evaluated (e.g. an empty port string).
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

fn default_enabled() -> bool {
    true
}

/// A single named check within a resource policy.
///
/// `field` is the key under which the check's result appears in the
/// resource's verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyCheck<C> {
    /// Verdict field name.
    pub field: String,

    /// The predicate to evaluate.
    pub check: C,

    /// The value required for compliance; `None` makes the field informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<Expected>,

    /// Description of what this check verifies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether this check is enabled. Disabled checks produce no field.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl<C: Check> PolicyCheck<C> {
    /// Creates a new enabled, informational check.
    pub fn new(field: impl Into<String>, check: C) -> Self {
        Self {
            field: field.into(),
            check,
            expect: None,
            description: None,
            enabled: true,
        }
    }

    /// Requires the check to produce the given flag.
    pub fn expect_flag(mut self, value: bool) -> Self {
        self.expect = Some(Expected::Flag(value));
        self
    }

    /// Requires the check to produce at most the given count.
    pub fn expect_at_most(mut self, max: usize) -> Self {
        self.expect = Some(Expected::AtMost(max));
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Enables or disables the check.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// A named, ordered list of checks for one resource type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct ResourcePolicy<C> {
    /// Human-readable policy name.
    pub name: String,

    /// Description of the policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Checks in verdict order.
    #[serde(default)]
    pub checks: Vec<PolicyCheck<C>>,
}

impl<C: Check> ResourcePolicy<C> {
    /// Creates an empty policy.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            checks: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a check and returns self for chaining.
    pub fn with_check(mut self, check: PolicyCheck<C>) -> Self {
        self.checks.push(check);
        self
    }

    /// Appends a check.
    pub fn add_check(&mut self, check: PolicyCheck<C>) {
        self.checks.push(check);
    }

    /// Returns the number of enabled checks.
    pub fn enabled_count(&self) -> usize {
        self.checks.iter().filter(|c| c.enabled).count()
    }

    /// Returns the verdict field names of enabled checks, in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| c.enabled)
            .map(|c| c.field.as_str())
            .collect()
    }

    /// Validates field names and check parameters.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if a field name is empty, if two enabled
    /// checks share a field name, if a check's parameters are invalid, or
    /// if an expectation cannot be met by the value its check produces.
    pub fn validate(&self) -> ComplianceResult<()> {
        let mut seen = HashSet::new();
        for check in self.checks.iter().filter(|c| c.enabled) {
            if check.field.is_empty() {
                return Err(ComplianceError::configuration(format!(
                    "policy '{}' has a check with an empty field name",
                    self.name
                )));
            }
            if !seen.insert(check.field.as_str()) {
                return Err(ComplianceError::configuration(format!(
                    "policy '{}' has duplicate field '{}'",
                    self.name, check.field
                )));
            }
            check.check.validate().map_err(|reason| {
                ComplianceError::configuration(format!(
                    "policy '{}' field '{}': {}",
                    self.name, check.field, reason
                ))
            })?;
            if let Some(expected) = &check.expect {
                if !check.check.accepts(expected) {
                    return Err(ComplianceError::configuration(format!(
                        "policy '{}' field '{}': expectation {:?} does not fit the check",
                        self.name, check.field, expected
                    )));
                }
            }
        }
        Ok(())
    }

    /// Evaluates every enabled check in order with the given predicate runner.
    pub(crate) fn evaluate_with<F>(&self, mut run: F) -> Verdict
    where
        F: FnMut(&C) -> VerdictValue,
    {
        let mut verdict = Verdict::new();
        for check in self.checks.iter().filter(|c| c.enabled) {
            verdict.push(check.field.clone(), run(&check.check), check.expect);
        }
        verdict
    }
}
