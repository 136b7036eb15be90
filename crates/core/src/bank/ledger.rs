//! Balance rules applied by every ledger authority implementation.
//!
//! Implementations load and lock the affected rows, ask [`LedgerService`]
//! for the new balances, and only write them back if it returns `Ok`.
//! Nothing here performs I/O.

use finbud_shared::types::{BankAccountId, MAX_BALANCE, Money};

use super::error::LedgerError;
use super::types::{BankAccount, InOutKind};

/// New balances produced by a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferBalances {
    /// Balance of the debited account after the transfer.
    pub from: Money,
    /// Balance of the credited account after the transfer.
    pub to: Money,
}

/// Pure balance rules for the ledger authority.
pub struct LedgerService;

impl LedgerService {
    /// Validate that a ledger amount is positive.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` for zero or negative amounts.
    pub fn validate_amount(amount: Money) -> Result<(), LedgerError> {
        if amount.is_positive() {
            Ok(())
        } else {
            Err(LedgerError::InvalidAmount(amount))
        }
    }

    /// Balance after debiting `amount`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InsufficientFunds` if the result would be negative.
    pub fn debit(id: BankAccountId, balance: Money, amount: Money) -> Result<Money, LedgerError> {
        Self::validate_amount(amount)?;
        match balance.checked_sub(amount) {
            Some(next) if !next.is_negative() => Ok(next),
            _ => Err(LedgerError::InsufficientFunds {
                bank_account_id: id,
                balance,
                amount,
            }),
        }
    }

    /// Balance after crediting `amount`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::BalanceLimitExceeded` if the result would exceed
    /// `MAX_BALANCE`.
    pub fn credit(id: BankAccountId, balance: Money, amount: Money) -> Result<Money, LedgerError> {
        Self::validate_amount(amount)?;
        match balance.checked_add(amount) {
            Some(next) if next <= MAX_BALANCE => Ok(next),
            _ => Err(LedgerError::BalanceLimitExceeded {
                bank_account_id: id,
                balance,
                amount,
            }),
        }
    }

    /// Balance after an `IN` (credit) or `OUT` (debit) movement.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::credit`] and [`Self::debit`].
    pub fn apply_in_out(
        kind: InOutKind,
        account: &BankAccount,
        amount: Money,
    ) -> Result<Money, LedgerError> {
        match kind {
            InOutKind::In => Self::credit(account.id, account.balance, amount),
            InOutKind::Out => Self::debit(account.id, account.balance, amount),
        }
    }

    /// Balances after moving `amount` from `from` to `to`.
    ///
    /// Both sides are checked before either is applied, so an error leaves
    /// both accounts untouched.
    ///
    /// # Errors
    ///
    /// Returns `SameBankAccount` if both sides are one account,
    /// `InsufficientFunds` for the debit side or `BalanceLimitExceeded` for
    /// the credit side.
    pub fn apply_transfer(
        from: &BankAccount,
        to: &BankAccount,
        amount: Money,
    ) -> Result<TransferBalances, LedgerError> {
        if from.id == to.id {
            return Err(LedgerError::SameBankAccount(from.id));
        }
        let from_balance = Self::debit(from.id, from.balance, amount)?;
        let to_balance = Self::credit(to.id, to.balance, amount)?;
        Ok(TransferBalances {
            from: from_balance,
            to: to_balance,
        })
    }
}
