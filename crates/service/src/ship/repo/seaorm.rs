use models::errors::ModelError;
use models::ship;
use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::errors::ServiceError;
use crate::pagination::ShipOrder;
use crate::ship::filter::ShipFilter;
use crate::ship::repository::ShipRepository;

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmShipRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmShipRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn repo_err(e: ModelError) -> ServiceError {
    match e {
        ModelError::Db(msg) => ServiceError::Db(msg),
        other => ServiceError::Model(other),
    }
}

#[async_trait::async_trait]
impl ShipRepository for SeaOrmShipRepository {
    async fn list(&self, filter: &ShipFilter, order: ShipOrder, page_idx: u64, per_page: u64) -> Result<Vec<ship::Model>, ServiceError> {
        ship::find_page(&self.db, filter.condition(self.db.get_database_backend()), order.column(), page_idx, per_page)
            .await
            .map_err(repo_err)
    }

    async fn count(&self, filter: &ShipFilter) -> Result<u64, ServiceError> {
        ship::count(&self.db, filter.condition(self.db.get_database_backend())).await.map_err(repo_err)
    }

    async fn find(&self, id: i64) -> Result<Option<ship::Model>, ServiceError> {
        ship::find(&self.db, id).await.map_err(repo_err)
    }

    async fn create(&self, ship: ship::Model) -> Result<ship::Model, ServiceError> {
        ship::insert(&self.db, ship).await.map_err(repo_err)
    }

    async fn update(&self, ship: ship::Model) -> Result<ship::Model, ServiceError> {
        ship::save(&self.db, ship).await.map_err(repo_err)
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        ship::delete(&self.db, id).await.map_err(repo_err)
    }
}
