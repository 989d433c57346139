use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use super::data::{Loan, LoanId, Tool, ToolCondition, ToolId, ToolStatus, User};
use super::seed;

/// Errors reported by inventory mutations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InventoryError {
    #[error("Tool not found: {0}")]
    ToolNotFound(ToolId),

    #[error("Loan not found: {0}")]
    LoanNotFound(LoanId),

    #[error("Loan already returned: {0}")]
    LoanAlreadyReturned(LoanId),
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Counts shown in the inventory overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InventoryStats {
    pub total: usize,
    pub available: usize,
    pub on_loan: usize,
    /// Tools in maintenance or damaged
    pub issues: usize,
}

/// The Inventory holds the authoritative in-memory list of tools and loans.
///
/// It lives for the whole process and is only mutated from the UI update
/// loop, so there is a single writer and no locking. Lookups are linear
/// scans; the collections are small.
pub struct Inventory {
    tools: Vec<Tool>,
    loans: Vec<Loan>,
    next_loan: u64,
}

impl Inventory {
    pub fn new(tools: Vec<Tool>, loans: Vec<Loan>) -> Self {
        let next_loan = loans.len() as u64 + 1;
        Inventory {
            tools,
            loans,
            next_loan,
        }
    }

    /// Create an inventory populated with the built-in seed records
    pub fn seeded() -> Self {
        let inventory = Self::new(seed::tools(), seed::loans());
        info!(
            tools = inventory.tools.len(),
            loans = inventory.loans.len(),
            "inventory seeded"
        );
        inventory
    }

    /// All tools in insertion order
    pub fn list(&self) -> &[Tool] {
        &self.tools
    }

    pub fn get(&self, id: &ToolId) -> Option<&Tool> {
        self.tools.iter().find(|tool| &tool.id == id)
    }

    fn get_mut(&mut self, id: &ToolId) -> InventoryResult<&mut Tool> {
        self.tools
            .iter_mut()
            .find(|tool| &tool.id == id)
            .ok_or_else(|| InventoryError::ToolNotFound(id.clone()))
    }

    /// Set a tool's status.
    ///
    /// Any status may follow any other; only the status field of the
    /// matching tool changes.
    pub fn set_status(&mut self, id: &ToolId, status: ToolStatus) -> InventoryResult<&Tool> {
        let tool = self.get_mut(id)?;
        let previous = tool.status;
        tool.status = status;
        info!(tool = %id, from = %previous, to = %status, "tool status changed");
        Ok(tool)
    }

    /// Record a reviewed condition for a tool (e.g. after a scan)
    pub fn set_condition(
        &mut self,
        id: &ToolId,
        condition: ToolCondition,
    ) -> InventoryResult<&Tool> {
        let tool = self.get_mut(id)?;
        let previous = tool.condition;
        tool.condition = condition;
        info!(tool = %id, from = %previous, to = %condition, "tool condition changed");
        Ok(tool)
    }

    /// Mark a tool as damaged
    pub fn report_issue(&mut self, id: &ToolId) -> InventoryResult<&Tool> {
        self.set_status(id, ToolStatus::Damaged)
    }

    /// Check a tool out to a user.
    ///
    /// Sets the tool to Loaned and records an active loan. A tool that
    /// already has an active loan is not rejected; the overlap is logged.
    pub fn borrow(
        &mut self,
        id: &ToolId,
        user: &User,
        at: DateTime<Utc>,
    ) -> InventoryResult<&Loan> {
        self.get_mut(id)?;

        let overlapping = self.active_loans_for(id).count();
        if overlapping > 0 {
            warn!(tool = %id, active = overlapping, "tool borrowed while it still has an active loan");
        }

        self.set_status(id, ToolStatus::Loaned)?;

        let loan = Loan {
            id: LoanId(format!("l{}", self.next_loan)),
            tool_id: id.clone(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            checkout_date: at,
            return_date: None,
            notes: None,
        };
        self.next_loan += 1;
        info!(loan = %loan.id, tool = %id, user = %user.name, "loan opened");

        self.loans.push(loan);
        let index = self.loans.len() - 1;
        Ok(&self.loans[index])
    }

    /// Close a loan.
    ///
    /// Once the tool has no other active loan and is still marked Loaned,
    /// it becomes Available again.
    pub fn return_loan(&mut self, loan_id: &LoanId, at: DateTime<Utc>) -> InventoryResult<&Loan> {
        let index = self
            .loans
            .iter()
            .position(|loan| &loan.id == loan_id)
            .ok_or_else(|| InventoryError::LoanNotFound(loan_id.clone()))?;

        if !self.loans[index].is_active() {
            return Err(InventoryError::LoanAlreadyReturned(loan_id.clone()));
        }

        self.loans[index].return_date = Some(at);
        let tool_id = self.loans[index].tool_id.clone();
        info!(loan = %loan_id, tool = %tool_id, "loan returned");

        let still_out = self.active_loans_for(&tool_id).count() > 0;
        let is_loaned = self
            .get(&tool_id)
            .map(|tool| tool.status == ToolStatus::Loaned)
            .unwrap_or(false);
        if !still_out && is_loaned {
            self.set_status(&tool_id, ToolStatus::Available)?;
        }

        Ok(&self.loans[index])
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn active_loans(&self) -> impl Iterator<Item = &Loan> {
        self.loans.iter().filter(|loan| loan.is_active())
    }

    pub fn active_loans_for<'a>(&'a self, id: &'a ToolId) -> impl Iterator<Item = &'a Loan> + 'a {
        self.active_loans().filter(move |loan| &loan.tool_id == id)
    }

    pub fn stats(&self) -> InventoryStats {
        self.tools
            .iter()
            .fold(InventoryStats::default(), |mut stats, tool| {
                stats.total += 1;
                match tool.status {
                    ToolStatus::Available => stats.available += 1,
                    ToolStatus::Loaned => stats.on_loan += 1,
                    status if status.is_issue() => stats.issues += 1,
                    _ => {}
                }
                stats
            })
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inventory")
            .field("tools", &self.tools.len())
            .field("loans", &self.loans.len())
            .finish()
    }
}
