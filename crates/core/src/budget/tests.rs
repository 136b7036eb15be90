//! Property-based tests for budget module.

use proptest::prelude::*;

use finbud_shared::types::{CategoryId, Money, TenantId};

use super::error::BudgetError;
use super::service::BudgetService;
use super::types::{CategoryAllocation, CreateBudgetInput, CreateBudgetItemInput, CreateBudgetMonthInput};

fn month(month: u32, year: i32, amounts: &[i64]) -> CreateBudgetMonthInput {
    CreateBudgetMonthInput {
        month,
        year,
        items: amounts
            .iter()
            .map(|a| CreateBudgetItemInput {
                category_id: CategoryId::new(),
                amount: Money::from_minor(*a),
            })
            .collect(),
    }
}

fn budget(months: Vec<CreateBudgetMonthInput>) -> CreateBudgetInput {
    CreateBudgetInput {
        account_id: TenantId::new(),
        name: "Household 2024".to_string(),
        description: None,
        months,
    }
}

proptest! {
    /// Every month number outside 1-12 is rejected, every one inside accepted.
    #[test]
    fn test_month_range(m in 0u32..100) {
        let result = BudgetService::validate_new_budget(&budget(vec![month(m, 2024, &[100])]));
        if (1..=12).contains(&m) {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(BudgetError::InvalidMonth(m)));
        }
    }

    /// Folding allocations preserves the grand total.
    #[test]
    fn test_total_by_category_preserves_sum(amounts in proptest::collection::vec(0i64..1_000_000, 1..20)) {
        let categories = [CategoryId::new(), CategoryId::new(), CategoryId::new()];
        let allocations: Vec<CategoryAllocation> = amounts
            .iter()
            .enumerate()
            .map(|(i, a)| CategoryAllocation {
                category_id: categories[i % categories.len()],
                amount: Money::from_minor(*a),
            })
            .collect();

        let folded = BudgetService::total_by_category(&allocations);
        let before: i64 = amounts.iter().sum();
        let after: i64 = folded.iter().map(|a| a.amount.minor_units()).sum();

        prop_assert_eq!(before, after);
        prop_assert!(folded.len() <= categories.len());
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_valid_budget() {
        let input = budget(vec![month(1, 2024, &[1_000, 2_000]), month(2, 2024, &[])]);
        assert!(BudgetService::validate_new_budget(&input).is_ok());
    }

    #[test]
    fn test_empty_name() {
        let mut input = budget(vec![month(1, 2024, &[])]);
        input.name = "  ".to_string();
        assert_eq!(
            BudgetService::validate_new_budget(&input),
            Err(BudgetError::EmptyName)
        );
    }

    #[test]
    fn test_no_months() {
        assert_eq!(
            BudgetService::validate_new_budget(&budget(vec![])),
            Err(BudgetError::NoMonths)
        );
    }

    #[test]
    fn test_duplicate_month() {
        let input = budget(vec![month(6, 2024, &[]), month(6, 2024, &[])]);
        assert_eq!(
            BudgetService::validate_new_budget(&input),
            Err(BudgetError::DuplicateMonth { month: 6, year: 2024 })
        );
    }

    #[test]
    fn test_same_month_different_year_is_fine() {
        let input = budget(vec![month(6, 2024, &[]), month(6, 2025, &[])]);
        assert!(BudgetService::validate_new_budget(&input).is_ok());
    }

    #[test]
    fn test_negative_allocation() {
        let input = budget(vec![month(3, 2024, &[100, -5])]);
        assert_eq!(
            BudgetService::validate_new_budget(&input),
            Err(BudgetError::NegativeAmount(Money::from_minor(-5)))
        );
    }

    #[test]
    fn test_total_by_category_merges_duplicates() {
        let food = CategoryId::new();
        let rent = CategoryId::new();
        let folded = BudgetService::total_by_category(&[
            CategoryAllocation { category_id: food, amount: Money::from_minor(100) },
            CategoryAllocation { category_id: rent, amount: Money::from_minor(900) },
            CategoryAllocation { category_id: food, amount: Money::from_minor(50) },
        ]);

        assert_eq!(folded.len(), 2);
        let food_total = folded.iter().find(|a| a.category_id == food).unwrap();
        assert_eq!(food_total.amount, Money::from_minor(150));
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_store_not_found_means_missing_category() {
        let err = BudgetError::from(StoreError::NotFound("category".into()));
        assert_eq!(err, BudgetError::CategoryNotFound);
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "CATEGORY_NOT_FOUND");
    }

    #[test]
    fn test_validation_errors_are_bad_requests() {
        assert_eq!(BudgetError::InvalidMonth(13).http_status_code(), 400);
        assert_eq!(
            BudgetError::DuplicateMonth { month: 1, year: 2024 }.error_code(),
            "DUPLICATE_BUDGET_MONTH"
        );
        assert_eq!(
            BudgetError::from(StoreError::Conflict("dup".into())).http_status_code(),
            500
        );
    }

    #[test]
    fn test_into_app_error() {
        let app: finbud_shared::AppError = BudgetError::CategoryNotFound.into();
        assert_eq!(app.status_code(), 404);
        assert_eq!(app.to_string(), "CATEGORY_NOT_FOUND: Category not found");
    }
}
