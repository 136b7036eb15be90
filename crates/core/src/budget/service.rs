//! Budget service for creation rules and allocation aggregation.

use std::collections::{BTreeMap, HashSet};

use finbud_shared::types::{CategoryId, Money};

use super::error::BudgetError;
use super::types::{CategoryAllocation, CreateBudgetInput};

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Returns true if `month` is a calendar month number.
    #[must_use]
    pub fn is_valid_month(month: u32) -> bool {
        (1..=12).contains(&month)
    }

    /// Validate budget creation input.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::EmptyName`, `NoMonths`, `InvalidMonth`,
    /// `DuplicateMonth`, or `NegativeAmount` for the first rule broken.
    pub fn validate_new_budget(input: &CreateBudgetInput) -> Result<(), BudgetError> {
        if input.name.trim().is_empty() {
            return Err(BudgetError::EmptyName);
        }

        if input.months.is_empty() {
            return Err(BudgetError::NoMonths);
        }

        let mut seen = HashSet::with_capacity(input.months.len());
        for m in &input.months {
            if !Self::is_valid_month(m.month) {
                return Err(BudgetError::InvalidMonth(m.month));
            }
            if !seen.insert((m.year, m.month)) {
                return Err(BudgetError::DuplicateMonth {
                    month: m.month,
                    year: m.year,
                });
            }
            if let Some(item) = m.items.iter().find(|i| i.amount.is_negative()) {
                return Err(BudgetError::NegativeAmount(item.amount));
            }
        }

        Ok(())
    }

    /// Fold allocations so each category appears once, ordered by category id.
    #[must_use]
    pub fn total_by_category(allocations: &[CategoryAllocation]) -> Vec<CategoryAllocation> {
        let mut totals: BTreeMap<CategoryId, Money> = BTreeMap::new();
        for a in allocations {
            let entry = totals.entry(a.category_id).or_insert(Money::ZERO);
            *entry = Money::from_minor(entry.minor_units().saturating_add(a.amount.minor_units()));
        }

        totals
            .into_iter()
            .map(|(category_id, amount)| CategoryAllocation {
                category_id,
                amount,
            })
            .collect()
    }
}
