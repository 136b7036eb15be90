//! Initial database migration.
//!
//! Creates the enum, tables, constraints and indexes for bank accounts,
//! budgets, categories and transactions. Balance and amount invariants are
//! mirrored as `CHECK` constraints.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: BANKING
        // ============================================================
        db.execute_unprepared(BANK_PROVIDERS_SQL).await?;
        db.execute_unprepared(BANK_ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: BUDGETING
        // ============================================================
        db.execute_unprepared(CATEGORIES_SQL).await?;
        db.execute_unprepared(BUDGETS_SQL).await?;
        db.execute_unprepared(BUDGET_DATES_SQL).await?;
        db.execute_unprepared(BUDGET_ITEMS_SQL).await?;

        // ============================================================
        // PART 4: TRANSACTIONS
        // ============================================================
        db.execute_unprepared(TRANSACTIONS_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE transaction_kind AS ENUM ('IN', 'OUT', 'TRANSFER');
";

const BANK_PROVIDERS_SQL: &str = r"
CREATE TABLE bank_providers (
    id          UUID PRIMARY KEY,
    name        VARCHAR(100) NOT NULL UNIQUE,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const BANK_ACCOUNTS_SQL: &str = r"
CREATE TABLE bank_accounts (
    id                UUID PRIMARY KEY,
    account_id        UUID NOT NULL,
    bank_provider_id  UUID NOT NULL REFERENCES bank_providers(id),
    name              VARCHAR(20) NOT NULL,
    account_number    CHAR(6) NOT NULL,
    branch            CHAR(3) NOT NULL,
    balance           BIGINT NOT NULL DEFAULT 0,
    created_at        TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at        TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT bank_accounts_name_not_empty CHECK (length(name) > 0),
    CONSTRAINT bank_accounts_account_number_digits CHECK (account_number ~ '^[0-9]{6}$'),
    CONSTRAINT bank_accounts_branch_digits CHECK (branch ~ '^[0-9]{3}$'),
    CONSTRAINT bank_accounts_balance_range CHECK (balance BETWEEN 0 AND 99999999999),
    CONSTRAINT bank_accounts_unique_number
        UNIQUE (account_id, bank_provider_id, branch, account_number)
);

CREATE INDEX idx_bank_accounts_account ON bank_accounts(account_id);
";

const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id          UUID PRIMARY KEY,
    account_id  UUID NOT NULL,
    name        VARCHAR(50) NOT NULL,
    icon        VARCHAR(50) NOT NULL,
    color       VARCHAR(9) NOT NULL,
    active      BOOLEAN NOT NULL DEFAULT TRUE
);

CREATE INDEX idx_categories_account ON categories(account_id);
";

const BUDGETS_SQL: &str = r"
CREATE TABLE budgets (
    id           UUID PRIMARY KEY,
    account_id   UUID NOT NULL,
    name         VARCHAR(100) NOT NULL,
    description  TEXT,
    created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT budgets_name_not_empty CHECK (length(trim(name)) > 0)
);

CREATE INDEX idx_budgets_account ON budgets(account_id);
";

const BUDGET_DATES_SQL: &str = r"
CREATE TABLE budget_dates (
    id         UUID PRIMARY KEY,
    budget_id  UUID NOT NULL REFERENCES budgets(id) ON DELETE CASCADE,
    month      INTEGER NOT NULL,
    year       INTEGER NOT NULL,

    CONSTRAINT budget_dates_month_range CHECK (month BETWEEN 1 AND 12),
    CONSTRAINT budget_dates_unique_month UNIQUE (budget_id, year, month)
);
";

const BUDGET_ITEMS_SQL: &str = r"
CREATE TABLE budget_items (
    id              UUID PRIMARY KEY,
    budget_date_id  UUID NOT NULL REFERENCES budget_dates(id) ON DELETE CASCADE,
    category_id     UUID NOT NULL REFERENCES categories(id),
    amount          BIGINT NOT NULL,

    CONSTRAINT budget_items_amount_non_negative CHECK (amount >= 0)
);

CREATE INDEX idx_budget_items_date ON budget_items(budget_date_id);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id                    UUID PRIMARY KEY,
    account_id            UUID NOT NULL,
    kind                  transaction_kind NOT NULL,
    name                  VARCHAR(100) NOT NULL,
    amount                BIGINT NOT NULL,
    bank_account_from_id  UUID REFERENCES bank_accounts(id),
    bank_account_to_id    UUID REFERENCES bank_accounts(id),
    bank_account_id       UUID REFERENCES bank_accounts(id),
    category_id           UUID REFERENCES categories(id),
    budget_date_id        UUID NOT NULL REFERENCES budget_dates(id),
    description           TEXT NOT NULL DEFAULT '',
    created_at            TIMESTAMPTZ NOT NULL,
    is_system_managed     BOOLEAN NOT NULL DEFAULT FALSE,

    CONSTRAINT transactions_amount_positive CHECK (amount > 0),
    CONSTRAINT transactions_shape CHECK (
        (kind = 'TRANSFER'
            AND bank_account_from_id IS NOT NULL
            AND bank_account_to_id IS NOT NULL
            AND bank_account_id IS NULL
            AND category_id IS NULL)
        OR
        (kind IN ('IN', 'OUT')
            AND bank_account_id IS NOT NULL
            AND category_id IS NOT NULL
            AND bank_account_from_id IS NULL
            AND bank_account_to_id IS NULL)
    )
);

CREATE INDEX idx_transactions_budget_date
    ON transactions(budget_date_id, created_at DESC, id DESC);
CREATE INDEX idx_transactions_account ON transactions(account_id);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION touch_updated_at() RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_bank_accounts_updated_at
    BEFORE UPDATE ON bank_accounts
    FOR EACH ROW EXECUTE FUNCTION touch_updated_at();

-- Transactions are append-only.
CREATE OR REPLACE FUNCTION reject_transaction_change() RETURNS TRIGGER AS $$
BEGIN
    RAISE EXCEPTION 'transactions are append-only';
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_transactions_append_only
    BEFORE UPDATE OR DELETE ON transactions
    FOR EACH ROW EXECUTE FUNCTION reject_transaction_change();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS transactions;
DROP TABLE IF EXISTS budget_items;
DROP TABLE IF EXISTS budget_dates;
DROP TABLE IF EXISTS budgets;
DROP TABLE IF EXISTS categories;
DROP TABLE IF EXISTS bank_accounts;
DROP TABLE IF EXISTS bank_providers;
DROP FUNCTION IF EXISTS reject_transaction_change();
DROP FUNCTION IF EXISTS touch_updated_at();
DROP TYPE IF EXISTS transaction_kind;
";
