//! Storage account policy.

use crate::core::StorageAccount;
use crate::policy::rules::{Check, PolicyCheck, ResourcePolicy};
use crate::policy::verdict::{Expected, Verdict, VerdictValue};

use serde::{Deserialize, Serialize};

/// A boolean setting of a storage account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageFlag {
    /// Blob encryption at rest.
    EncryptionEnabled,
    /// HTTPS-only traffic.
    SecureTransferRequired,
}

impl StorageFlag {
    /// Reads the flag from an account. Unset values read as `None`.
    pub fn read(&self, account: &StorageAccount) -> Option<bool> {
        match self {
            Self::EncryptionEnabled => account.encryption_enabled,
            Self::SecureTransferRequired => account.secure_transfer_required,
        }
    }
}

/// A predicate over a storage account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageCheck {
    /// Passes iff the flag is present and exactly `true`.
    FlagEnabled {
        /// The flag to read.
        flag: StorageFlag,
    },
}

impl StorageCheck {
    /// Creates a `FlagEnabled` check.
    pub fn flag_enabled(flag: StorageFlag) -> Self {
        Self::FlagEnabled { flag }
    }

    /// Evaluates this check against an account.
    pub fn evaluate(&self, account: &StorageAccount) -> VerdictValue {
        match self {
            Self::FlagEnabled { flag } => VerdictValue::Flag(flag.read(account) == Some(true)),
        }
    }
}

impl Check for StorageCheck {
    fn accepts(&self, expected: &Expected) -> bool {
        matches!(expected, Expected::Flag(_))
    }
}

/// Policy applied to every storage account.
pub type StoragePolicy = ResourcePolicy<StorageCheck>;

impl ResourcePolicy<StorageCheck> {
    /// The built-in storage account policy.
    ///
    /// - `encryption_enabled`: encryption flag is `true`
    /// - `secure_transfer_required`: secure transfer flag is `true`
    pub fn baseline() -> Self {
        Self::new("storage-account-baseline")
            .with_description("Storage accounts must encrypt data and require HTTPS")
            .with_check(
                PolicyCheck::new(
                    "encryption_enabled",
                    StorageCheck::flag_enabled(StorageFlag::EncryptionEnabled),
                )
                .expect_flag(true),
            )
            .with_check(
                PolicyCheck::new(
                    "secure_transfer_required",
                    StorageCheck::flag_enabled(StorageFlag::SecureTransferRequired),
                )
                .expect_flag(true),
            )
    }

    /// Evaluates the policy against one storage account.
    pub fn evaluate(&self, account: &StorageAccount) -> Verdict {
        self.evaluate_with(|check| check.evaluate(account))
    }
}
