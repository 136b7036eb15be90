//! Bank account onboarding rules.

use super::error::BankAccountError;
use super::types::CreateBankAccountInput;

/// Maximum display-name length, in characters.
const MAX_NAME_LEN: usize = 20;
/// Exact number of digits in an account number.
const ACCOUNT_NUMBER_LEN: usize = 6;
/// Exact number of digits in a branch code.
const BRANCH_LEN: usize = 3;

/// Bank account service for business logic.
pub struct BankAccountService;

impl BankAccountService {
    /// Validate input for registering a bank account.
    ///
    /// # Errors
    ///
    /// Returns the first rule the input breaks: name length, account number
    /// format, branch format, then opening balance range.
    pub fn validate_new_account(input: &CreateBankAccountInput) -> Result<(), BankAccountError> {
        let name_len = input.name.trim().chars().count();
        if name_len == 0 || input.name.chars().count() > MAX_NAME_LEN {
            return Err(BankAccountError::InvalidName);
        }

        if !is_digits(&input.account_number, ACCOUNT_NUMBER_LEN) {
            return Err(BankAccountError::InvalidAccountNumber);
        }

        if !is_digits(&input.branch, BRANCH_LEN) {
            return Err(BankAccountError::InvalidBranch);
        }

        if !input.balance.is_valid_balance() {
            return Err(BankAccountError::InvalidBalance(input.balance));
        }

        Ok(())
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}
