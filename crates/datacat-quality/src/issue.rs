// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[non_exhaustive]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum IssueType {
    InvalidOwnerUrl,
    ApiStatusMismatch,
    InconsistentLicense,
    DuplicateTags,
    TagHygiene,
    IncompleteIdentifier,
    CountryNameMismatch,
    MissingMacroregion,
    OwnerLocationHasMacroregion,
    MissingOwnerLink,
    MissingTags,
    MissingTopics,
    InvalidSoftwareId,
    SoftwareNameMismatch,
    DuplicateRecordId,
    DuplicateNationalRecord,
}

impl IssueType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidOwnerUrl => "INVALID_OWNER_URL",
            Self::ApiStatusMismatch => "API_STATUS_MISMATCH",
            Self::InconsistentLicense => "INCONSISTENT_LICENSE",
            Self::DuplicateTags => "DUPLICATE_TAGS",
            Self::TagHygiene => "TAG_HYGIENE",
            Self::IncompleteIdentifier => "INCOMPLETE_IDENTIFIER",
            Self::CountryNameMismatch => "COUNTRY_NAME_MISMATCH",
            Self::MissingMacroregion => "MISSING_MACROREGION",
            Self::OwnerLocationHasMacroregion => "OWNER_LOCATION_HAS_MACROREGION",
            Self::MissingOwnerLink => "MISSING_OWNER_LINK",
            Self::MissingTags => "MISSING_TAGS",
            Self::MissingTopics => "MISSING_TOPICS",
            Self::InvalidSoftwareId => "INVALID_SOFTWARE_ID",
            Self::SoftwareNameMismatch => "SOFTWARE_NAME_MISMATCH",
            Self::DuplicateRecordId => "DUPLICATE_RECORD_ID",
            Self::DuplicateNationalRecord => "DUPLICATE_NATIONAL_RECORD",
        }
    }

    /// Parse the operator-facing rule name, as passed to `--rule`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_ascii_uppercase();
        Self::ALL.iter().copied().find(|t| t.as_str() == wanted)
    }

    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::DuplicateRecordId => Severity::Critical,
            Self::InvalidSoftwareId
            | Self::SoftwareNameMismatch
            | Self::CountryNameMismatch
            | Self::ApiStatusMismatch
            | Self::OwnerLocationHasMacroregion
            | Self::InvalidOwnerUrl => Severity::High,
            Self::MissingMacroregion
            | Self::DuplicateTags
            | Self::TagHygiene
            | Self::IncompleteIdentifier
            | Self::InconsistentLicense
            | Self::DuplicateNationalRecord => Severity::Medium,
            Self::MissingOwnerLink | Self::MissingTags | Self::MissingTopics => Severity::Low,
        }
    }

    pub const ALL: [Self; 16] = [
        Self::InvalidOwnerUrl,
        Self::ApiStatusMismatch,
        Self::InconsistentLicense,
        Self::DuplicateTags,
        Self::TagHygiene,
        Self::IncompleteIdentifier,
        Self::CountryNameMismatch,
        Self::MissingMacroregion,
        Self::OwnerLocationHasMacroregion,
        Self::MissingOwnerLink,
        Self::MissingTags,
        Self::MissingTopics,
        Self::InvalidSoftwareId,
        Self::SoftwareNameMismatch,
        Self::DuplicateRecordId,
        Self::DuplicateNationalRecord,
    ];
}

impl Display for IssueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One defect found by a rule, with enough context to act on it from a
/// report alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub record_id: String,
    pub file_path: PathBuf,
    pub issue_type: IssueType,
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<String>,
    pub suggested_action: String,
    pub severity: Severity,
}

impl Issue {
    #[must_use]
    pub fn new(
        record_id: &str,
        file_path: &std::path::Path,
        issue_type: IssueType,
        field: impl Into<String>,
        suggested_action: impl Into<String>,
    ) -> Self {
        Self {
            record_id: record_id.to_string(),
            file_path: file_path.to_path_buf(),
            issue_type,
            field: field.into(),
            current_value: None,
            suggested_action: suggested_action.into(),
            severity: issue_type.severity(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.current_value = Some(value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{IssueType, Severity};

    #[test]
    fn rule_names_round_trip() {
        for issue_type in IssueType::ALL {
            assert_eq!(IssueType::parse(issue_type.as_str()), Some(issue_type));
        }
        assert_eq!(
            IssueType::parse("api_status_mismatch"),
            Some(IssueType::ApiStatusMismatch)
        );
        assert_eq!(IssueType::parse("NOT_A_RULE"), None);
    }

    #[test]
    fn duplicate_id_is_critical() {
        assert_eq!(IssueType::DuplicateRecordId.severity(), Severity::Critical);
        assert_eq!(IssueType::MissingTags.severity(), Severity::Low);
    }
}
