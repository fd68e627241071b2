use async_trait::async_trait;
use models::ship;

use crate::errors::ServiceError;
use crate::pagination::ShipOrder;
use crate::ship::filter::ShipFilter;

/// Repository abstraction for ship persistence and queries.
#[async_trait]
pub trait ShipRepository: Send + Sync {
    /// One page of ships matching `filter`, sorted ascending by `order`.
    async fn list(&self, filter: &ShipFilter, order: ShipOrder, page_idx: u64, per_page: u64) -> Result<Vec<ship::Model>, ServiceError>;
    /// Number of ships matching `filter`, ignoring paging.
    async fn count(&self, filter: &ShipFilter) -> Result<u64, ServiceError>;
    async fn find(&self, id: i64) -> Result<Option<ship::Model>, ServiceError>;
    /// Persist a new ship; the storage assigns the id.
    async fn create(&self, ship: ship::Model) -> Result<ship::Model, ServiceError>;
    /// Overwrite the stored ship with the same id.
    async fn update(&self, ship: ship::Model) -> Result<ship::Model, ServiceError>;
    /// Returns `false` when no ship had that id.
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockShipRepository {
        ships: Mutex<BTreeMap<i64, ship::Model>>, // key: id
        last_id: Mutex<i64>,
    }

    #[async_trait]
    impl ShipRepository for MockShipRepository {
        async fn list(&self, filter: &ShipFilter, order: ShipOrder, page_idx: u64, per_page: u64) -> Result<Vec<ship::Model>, ServiceError> {
            let ships = self.ships.lock().unwrap();
            let mut matching: Vec<ship::Model> = ships.values().filter(|s| filter.matches(s)).cloned().collect();
            matching.sort_by(|a, b| order.compare(a, b));
            let skip = usize::try_from(page_idx * per_page).unwrap_or(usize::MAX);
            let take = usize::try_from(per_page).unwrap_or(usize::MAX);
            Ok(matching.into_iter().skip(skip).take(take).collect())
        }

        async fn count(&self, filter: &ShipFilter) -> Result<u64, ServiceError> {
            let ships = self.ships.lock().unwrap();
            Ok(ships.values().filter(|s| filter.matches(s)).count() as u64)
        }

        async fn find(&self, id: i64) -> Result<Option<ship::Model>, ServiceError> {
            let ships = self.ships.lock().unwrap();
            Ok(ships.get(&id).cloned())
        }

        async fn create(&self, mut ship: ship::Model) -> Result<ship::Model, ServiceError> {
            let mut last_id = self.last_id.lock().unwrap();
            *last_id += 1;
            ship.id = *last_id;
            self.ships.lock().unwrap().insert(ship.id, ship.clone());
            Ok(ship)
        }

        async fn update(&self, ship: ship::Model) -> Result<ship::Model, ServiceError> {
            let mut ships = self.ships.lock().unwrap();
            match ships.get_mut(&ship.id) {
                Some(existing) => {
                    *existing = ship.clone();
                    Ok(ship)
                }
                None => Err(ServiceError::not_found("ship")),
            }
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            let mut ships = self.ships.lock().unwrap();
            Ok(ships.remove(&id).is_some())
        }
    }
}
