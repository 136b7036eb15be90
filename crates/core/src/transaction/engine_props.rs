//! Property-based tests for the transaction engine.

use proptest::prelude::*;

use finbud_shared::types::Money;

use crate::transaction::fixtures::{World, at};
use crate::transaction::{GetListInput, TransactionKind};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn movement() -> impl Strategy<Value = (bool, i64)> {
    (any::<bool>(), 1i64..=400)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A page holds `min(limit, total - offset)` rows and reports the full total.
    #[test]
    fn prop_page_sizes_add_up(count in 0usize..25, limit in 1u32..8, page in 1u32..6) {
        let world = World::new(1_000_000, 0);
        runtime().block_on(async {
            for minute in 0..count {
                let mut input = world.in_out(TransactionKind::Out, world.a, 1);
                input.created_at = at(i64::try_from(minute).unwrap());
                world.engine.in_out(input).await.unwrap();
            }

            let result = world
                .engine
                .get_list(GetListInput {
                    account_id: world.tenant,
                    budget_id: world.budget_id,
                    month: 8,
                    year: 2025,
                    limit,
                    page,
                })
                .await
                .unwrap();

            let offset = (page as usize - 1) * limit as usize;
            let expected = count.saturating_sub(offset).min(limit as usize);
            prop_assert_eq!(result.data.len(), expected);
            prop_assert_eq!(result.paging.total, count as u64);
            prop_assert_eq!(result.paging.total_pages, (count as u64).div_ceil(u64::from(limit)));
            prop_assert!(result.data.windows(2).all(|w| w[0].created_at >= w[1].created_at));
            Ok(())
        })?;
    }

    /// The balance always equals the opening balance plus accepted incomes
    /// minus accepted expenses, and one record exists per accepted movement.
    #[test]
    fn prop_balance_matches_accepted_movements(
        opening in 0i64..=1_000,
        ops in prop::collection::vec(movement(), 0..30),
    ) {
        let world = World::new(opening, 0);
        runtime().block_on(async {
            let mut expected = opening;
            let mut accepted = 0usize;
            for (income, amount) in ops {
                let kind = if income { TransactionKind::In } else { TransactionKind::Out };
                let result = world
                    .engine
                    .in_out(world.in_out(kind, world.a, amount))
                    .await;
                if result.is_ok() {
                    expected += if income { amount } else { -amount };
                    accepted += 1;
                } else {
                    prop_assert!(!income && amount > expected);
                }
                prop_assert!(expected >= 0);
            }

            prop_assert_eq!(world.backend.balance(world.a), Money::from_minor(expected));
            prop_assert_eq!(world.backend.transactions().len(), accepted);
            Ok(())
        })?;
    }
}
