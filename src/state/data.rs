/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the inventory store, the inference client and the UI layer.
/// Field names serialize in camelCase to match the inference wire format
/// and the shape of the seed records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a tool
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ToolId(pub String);

/// Opaque identifier of a loan
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct LoanId(pub String);

/// Opaque identifier of a user
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Loan lifecycle of a tool
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolStatus {
    Available,
    Loaned,
    Maintenance,
    Damaged,
}

impl ToolStatus {
    /// Whether the tool needs attention (counted as an "issue" in the overview)
    pub fn is_issue(self) -> bool {
        matches!(self, ToolStatus::Maintenance | ToolStatus::Damaged)
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ToolStatus::Available => "Available",
            ToolStatus::Loaned => "Loaned",
            ToolStatus::Maintenance => "Maintenance",
            ToolStatus::Damaged => "Damaged",
        };
        f.write_str(label)
    }
}

/// Physical quality of a tool, independent of its status
///
/// The aliases let the decoder accept the casing variations the
/// inference service occasionally produces; anything outside the
/// closed set is still rejected.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolCondition {
    #[serde(alias = "good", alias = "GOOD")]
    Good,
    #[serde(alias = "fair", alias = "FAIR")]
    Fair,
    #[serde(alias = "poor", alias = "POOR")]
    Poor,
}

impl fmt::Display for ToolCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ToolCondition::Good => "Good",
            ToolCondition::Fair => "Fair",
            ToolCondition::Poor => "Poor",
        };
        f.write_str(label)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Owner,
    Mechanic,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Owner => f.write_str("OWNER"),
            UserRole::Mechanic => f.write_str("MECHANIC"),
        }
    }
}

/// A physical workshop item tracked by the inventory
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: ToolId,
    pub name: String,
    pub category: String,
    pub brand: String,
    /// Rack or cabinet the tool is kept in
    pub location: String,
    pub image_url: String,
    pub status: ToolStatus,
    pub condition: ToolCondition,
    pub purchase_date: NaiveDate,
    pub last_maintenance_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanStatus {
    Active,
    Returned,
}

/// A record of a tool being checked out by a user
///
/// The status is derived from `return_date`, so a returned loan
/// always carries its return timestamp.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: LoanId,
    pub tool_id: ToolId,
    pub user_id: UserId,
    /// Cached for display so the loan list doesn't need a user lookup
    pub user_name: String,
    pub checkout_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Loan {
    pub fn status(&self) -> LoanStatus {
        match self.return_date {
            Some(_) => LoanStatus::Returned,
            None => LoanStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status() == LoanStatus::Active
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Structured output of a single scan
///
/// Ephemeral: lives in the scan session until the scanner closes or a
/// new image is selected.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub tool_name: String,
    pub condition: ToolCondition,
    /// Defects spotted in the photo
    pub description: String,
    pub maintenance_suggestion: String,
    /// 0 to 100 inclusive
    pub confidence_score: f64,
}

impl AnalysisResult {
    /// The fixed result returned whenever analysis fails for any reason
    pub fn fallback() -> Self {
        Self {
            tool_name: "Unknown Tool (AI Error)".to_string(),
            condition: ToolCondition::Fair,
            description: "Could not analyze image. Please try again.".to_string(),
            maintenance_suggestion: "Check manually.".to_string(),
            confidence_score: 0.0,
        }
    }

    /// Check if this is the fallback value rather than a real assessment
    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tool() -> Tool {
        Tool {
            id: ToolId("t-1".to_string()),
            name: "Kunci Momen 1/2\"".to_string(),
            category: "Hand Tools".to_string(),
            brand: "Tekiro".to_string(),
            location: "Rak A-1".to_string(),
            image_url: "https://example.com/torque.jpg".to_string(),
            status: ToolStatus::Available,
            condition: ToolCondition::Poor,
            purchase_date: NaiveDate::from_ymd_opt(2022, 3, 14).unwrap(),
            last_maintenance_date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            description: Some("Calibrated yearly".to_string()),
        }
    }

    #[test]
    fn test_tool_round_trip() {
        let tool = sample_tool();

        let json = serde_json::to_string(&tool).unwrap();
        let restored: Tool = serde_json::from_str(&json).unwrap();

        assert_eq!(tool, restored);
    }

    #[test]
    fn test_tool_wire_names() {
        let value = serde_json::to_value(sample_tool()).unwrap();

        assert_eq!(value["status"], "Available");
        assert_eq!(value["condition"], "Poor");
        assert_eq!(value["lastMaintenanceDate"], "2024-01-20");
        assert_eq!(value["imageUrl"], "https://example.com/torque.jpg");
    }

    #[test]
    fn test_status_and_condition_are_independent() {
        // Available and Poor at the same time is a valid record
        let tool = sample_tool();
        assert_eq!(tool.status, ToolStatus::Available);
        assert_eq!(tool.condition, ToolCondition::Poor);
    }

    #[test]
    fn test_condition_rejects_unknown_value() {
        assert_eq!(
            serde_json::from_str::<ToolCondition>("\"good\"").unwrap(),
            ToolCondition::Good
        );
        assert!(serde_json::from_str::<ToolCondition>("\"Excellent\"").is_err());
    }

    #[test]
    fn test_loan_status_follows_return_date() {
        let mut loan = Loan {
            id: LoanId("l-1".to_string()),
            tool_id: ToolId("t-1".to_string()),
            user_id: UserId("u-2".to_string()),
            user_name: "Budi Santoso".to_string(),
            checkout_date: Utc::now(),
            return_date: None,
            notes: None,
        };
        assert_eq!(loan.status(), LoanStatus::Active);

        loan.return_date = Some(Utc::now());
        assert_eq!(loan.status(), LoanStatus::Returned);
    }

    #[test]
    fn test_fallback_detection() {
        assert!(AnalysisResult::fallback().is_fallback());

        let mut result = AnalysisResult::fallback();
        result.confidence_score = 12.0;
        assert!(!result.is_fallback());
    }

    #[test]
    fn test_user_role_wire_format() {
        assert_eq!(serde_json::to_string(&UserRole::Mechanic).unwrap(), "\"MECHANIC\"");
    }
}
