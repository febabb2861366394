//! Compliance verdicts.
//!
//! A verdict is an ordered list of named values, one per enabled policy
//! check. It serializes as a JSON object whose keys follow the policy's
//! check order, independently of how `serde_json` orders its own maps.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Summary of an inbound rule that matched a policy check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSummary {
    /// Rule name.
    pub name: Option<String>,
    /// Source address prefix of the rule.
    pub source_address: Option<String>,
    /// Destination port range of the rule.
    pub destination_port: Option<String>,
}

/// The value produced by a single policy check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerdictValue {
    /// A pass/fail predicate result.
    Flag(bool),
    /// A number of matches.
    Count(usize),
    /// The matching rules themselves.
    Rules(Vec<RuleSummary>),
}

impl VerdictValue {
    /// Returns the boolean, if this is a flag.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the number, if this is a count.
    pub fn as_count(&self) -> Option<usize> {
        match self {
            Self::Count(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the rules, if this is a rule list.
    pub fn as_rules(&self) -> Option<&[RuleSummary]> {
        match self {
            Self::Rules(rules) => Some(rules),
            _ => None,
        }
    }
}

/// The value a check must produce for the resource to be compliant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expected {
    /// The flag must equal this value.
    Flag(bool),
    /// The count (or rule list length) must not exceed this value.
    AtMost(usize),
}

impl Expected {
    /// Returns `true` if `value` satisfies this expectation.
    ///
    /// A value of a different shape never satisfies it.
    pub fn is_met_by(&self, value: &VerdictValue) -> bool {
        match (self, value) {
            (Self::Flag(expected), VerdictValue::Flag(actual)) => expected == actual,
            (Self::AtMost(max), VerdictValue::Count(count)) => count <= max,
            (Self::AtMost(max), VerdictValue::Rules(rules)) => rules.len() <= *max,
            _ => false,
        }
    }
}

/// One named entry of a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictField {
    /// Field name, as it appears in the report.
    pub name: String,
    /// The check's result.
    pub value: VerdictValue,
    /// What the policy expects, if the field is a requirement.
    pub expected: Option<Expected>,
}

impl VerdictField {
    /// Returns `true` if the field has an expectation that the value misses.
    pub fn is_failing(&self) -> bool {
        self.expected
            .map(|expected| !expected.is_met_by(&self.value))
            .unwrap_or(false)
    }
}

/// The structured compliance result for one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    fields: Vec<VerdictField>,
}

impl Verdict {
    /// Creates an empty verdict.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    pub fn push(&mut self, name: impl Into<String>, value: VerdictValue, expected: Option<Expected>) {
        self.fields.push(VerdictField {
            name: name.into(),
            value,
            expected,
        });
    }

    /// Appends a field and returns self for chaining.
    pub fn with_field(mut self, name: impl Into<String>, value: VerdictValue) -> Self {
        self.push(name, value, None);
        self
    }

    /// Returns the fields in policy order.
    pub fn fields(&self) -> &[VerdictField] {
        &self.fields
    }

    /// Returns the value of a field.
    pub fn get(&self, name: &str) -> Option<&VerdictValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    /// Returns a flag field.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(VerdictValue::as_flag)
    }

    /// Returns a count field.
    pub fn count(&self, name: &str) -> Option<usize> {
        self.get(name).and_then(VerdictValue::as_count)
    }

    /// Returns a rule list field.
    pub fn rules(&self, name: &str) -> Option<&[RuleSummary]> {
        self.get(name).and_then(VerdictValue::as_rules)
    }

    /// Returns the names of fields that miss their expectation.
    pub fn failing_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| field.is_failing())
            .map(|field| field.name.as_str())
            .collect()
    }

    /// Returns `true` if every field meets its expectation.
    pub fn is_compliant(&self) -> bool {
        !self.fields.iter().any(VerdictField::is_failing)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the verdict has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Verdict {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct VerdictVisitor;

        impl<'de> Visitor<'de> for VerdictVisitor {
            type Value = Verdict;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of verdict fields")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Verdict, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut verdict = Verdict::new();
                while let Some((name, value)) = access.next_entry::<String, VerdictValue>()? {
                    verdict.push(name, value, None);
                }
                Ok(verdict)
            }
        }

        deserializer.deserialize_map(VerdictVisitor)
    }
}
