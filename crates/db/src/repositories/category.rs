//! Category repository.

use finbud_core::StoreError;
use finbud_core::category::{Category, CategoryLookup};
use finbud_shared::types::{CategoryId, TenantId};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::categories;
use crate::error::store_err;

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: CategoryId::from_uuid(model.id),
            account_id: TenantId::from_uuid(model.account_id),
            name: model.name,
            icon: model.icon,
            color: model.color,
            active: model.active,
        }
    }
}

/// Category repository for tenant-scoped reads.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl CategoryLookup for CategoryRepository {
    async fn get_by_id(
        &self,
        id: CategoryId,
        account_id: TenantId,
        active: Option<bool>,
    ) -> Result<Option<Category>, StoreError> {
        let mut query = categories::Entity::find_by_id(id.into_inner())
            .filter(categories::Column::AccountId.eq(account_id.into_inner()));

        if let Some(active) = active {
            query = query.filter(categories::Column::Active.eq(active));
        }

        let model = query.one(&self.db).await.map_err(store_err)?;
        Ok(model.map(Category::from))
    }
}
