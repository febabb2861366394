//! Compliance policies and rule evaluators.
//!
//! Each evaluated resource type has a [`ResourcePolicy`]: a named, ordered
//! list of checks. Evaluating a policy against a resource yields a
//! [`Verdict`] whose fields appear in check order.
//!
//! - [`storage`] - Storage account flags
//! - [`vm`] - VM tags, public exposure, and RDP/SSH blocking through NSGs
//! - [`nsg`] - Overly permissive inbound rules on critical ports

pub mod nsg;
mod rules;
mod set;
pub mod storage;
mod verdict;
pub mod vm;

pub use nsg::{NsgCheck, NsgPolicy};
pub use rules::{Check, PolicyCheck, ResourcePolicy};
pub use set::PolicySet;
pub use storage::{StorageCheck, StorageFlag, StoragePolicy};
pub use verdict::{Expected, RuleSummary, Verdict, VerdictField, VerdictValue};
pub use vm::{VmCheck, VmPolicy};
