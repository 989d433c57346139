/// Static seed records the application starts with
///
/// There is no persistence: every launch begins from exactly this data.

use chrono::{NaiveDate, TimeZone, Utc};

use super::data::{Loan, LoanId, Tool, ToolCondition, ToolId, ToolStatus, User, UserId, UserRole};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn tool(
    id: &str,
    name: &str,
    category: &str,
    brand: &str,
    location: &str,
    status: ToolStatus,
    condition: ToolCondition,
    purchased: NaiveDate,
    maintained: NaiveDate,
) -> Tool {
    Tool {
        id: ToolId(id.to_string()),
        name: name.to_string(),
        category: category.to_string(),
        brand: brand.to_string(),
        location: location.to_string(),
        image_url: format!("https://images.bengkelmate.app/tools/{}.jpg", id),
        status,
        condition,
        purchase_date: purchased,
        last_maintenance_date: maintained,
        description: None,
    }
}

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "t1",
            "Kunci Momen 1/2\"",
            "Hand Tools",
            "Tekiro",
            "Rak A-1",
            ToolStatus::Available,
            ToolCondition::Good,
            date(2023, 2, 10),
            date(2024, 4, 2),
        ),
        tool(
            "t2",
            "Bor Listrik 13mm",
            "Power Tools",
            "Makita",
            "Lemari B-2",
            ToolStatus::Loaned,
            ToolCondition::Fair,
            date(2022, 8, 17),
            date(2024, 1, 15),
        ),
        tool(
            "t3",
            "Gerinda Tangan 4\"",
            "Power Tools",
            "Bosch",
            "Lemari B-3",
            ToolStatus::Maintenance,
            ToolCondition::Poor,
            date(2021, 11, 5),
            date(2023, 12, 20),
        ),
        tool(
            "t4",
            "Kompresor Angin 2HP",
            "Pneumatic",
            "Lakoni",
            "Area C",
            ToolStatus::Available,
            ToolCondition::Fair,
            date(2022, 5, 30),
            date(2024, 3, 11),
        ),
        tool(
            "t5",
            "Dongkrak Buaya 3 Ton",
            "Lifting",
            "Krisbow",
            "Area C",
            ToolStatus::Damaged,
            ToolCondition::Poor,
            date(2020, 9, 14),
            date(2023, 6, 1),
        ),
        tool(
            "t6",
            "Multimeter Digital",
            "Electrical",
            "Fluke",
            "Rak A-3",
            ToolStatus::Available,
            ToolCondition::Good,
            date(2023, 7, 22),
            date(2024, 5, 6),
        ),
    ]
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: UserId("u1".to_string()),
            name: "Pak Hendra".to_string(),
            email: "hendra@bengkelmate.app".to_string(),
            role: UserRole::Owner,
            avatar_url: None,
        },
        User {
            id: UserId("u2".to_string()),
            name: "Budi Santoso".to_string(),
            email: "budi@bengkelmate.app".to_string(),
            role: UserRole::Mechanic,
            avatar_url: None,
        },
    ]
}

/// The mechanic the session runs as
pub fn current_user() -> User {
    users()
        .into_iter()
        .find(|user| user.role == UserRole::Mechanic)
        .unwrap_or_else(|| User {
            id: UserId("u2".to_string()),
            name: "Mechanic".to_string(),
            email: String::new(),
            role: UserRole::Mechanic,
            avatar_url: None,
        })
}

pub fn loans() -> Vec<Loan> {
    vec![Loan {
        id: LoanId("l1".to_string()),
        tool_id: ToolId("t2".to_string()),
        user_id: UserId("u2".to_string()),
        user_name: "Budi Santoso".to_string(),
        checkout_date: Utc
            .with_ymd_and_hms(2024, 5, 14, 8, 30, 0)
            .single()
            .unwrap_or_default(),
        return_date: None,
        notes: Some("Servis mesin Kijang".to_string()),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_loans_reference_seed_tools() {
        let tools = tools();
        for loan in loans() {
            let tool = tools.iter().find(|t| t.id == loan.tool_id);
            assert!(tool.is_some(), "loan {} points at a missing tool", loan.id);
        }
    }

    #[test]
    fn test_loaned_tools_have_active_loans() {
        let loans = loans();
        for tool in tools().iter().filter(|t| t.status == ToolStatus::Loaned) {
            assert!(loans.iter().any(|l| l.tool_id == tool.id && l.is_active()));
        }
    }

    #[test]
    fn test_current_user_is_mechanic() {
        assert_eq!(current_user().role, UserRole::Mechanic);
    }
}
