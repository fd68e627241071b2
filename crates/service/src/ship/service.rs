use std::sync::Arc;

use models::ship;
use tracing::{debug, info, instrument};

use super::domain::{ShipInput, ShipQuery};
use super::filter::ShipFilter;
use super::repository::ShipRepository;
use crate::errors::ServiceError;
use crate::pagination::PageRequest;

/// Parse a path id. Only positive integers are valid.
///
/// # Examples
/// ```
/// use service::ship::parse_id;
/// assert_eq!(parse_id("17").unwrap(), 17);
/// assert!(parse_id("0").is_err());
/// assert!(parse_id("abc").is_err());
/// ```
pub fn parse_id(raw: &str) -> Result<i64, ServiceError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ServiceError::validation(format!("invalid id: {:?}", raw))),
    }
}

/// Ship catalog operations independent of web framework
pub struct ShipService<R: ShipRepository> {
    repo: Arc<R>,
}

impl<R: ShipRepository> ShipService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// One page of ships matching the query, sorted by the requested field.
    ///
    /// # Examples
    /// ```
    /// use service::ship::{ShipService, repository::mock::MockShipRepository};
    /// use service::ship::domain::ShipQuery;
    /// use service::pagination::PageRequest;
    /// use std::sync::Arc;
    /// let svc = ShipService::new(Arc::new(MockShipRepository::default()));
    /// let page = tokio_test::block_on(svc.list(&ShipQuery::default(), PageRequest::default())).unwrap();
    /// assert!(page.is_empty());
    /// ```
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ShipQuery, page: PageRequest) -> Result<Vec<ship::Model>, ServiceError> {
        let filter = ShipFilter::from_query(query)?;
        let (page_idx, per_page) = page.normalize()?;
        debug!(predicates = filter.predicates().len(), "listing ships");
        self.repo.list(&filter, page.order, page_idx, per_page).await
    }

    /// Number of ships matching the query. Paging does not apply.
    #[instrument(skip(self, query))]
    pub async fn count(&self, query: &ShipQuery) -> Result<u64, ServiceError> {
        let filter = ShipFilter::from_query(query)?;
        self.repo.count(&filter).await
    }

    /// Validate and store a new ship; the stored record gets a fresh id and rating.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use models::ship::ShipType;
    /// use service::ship::{ShipService, repository::mock::MockShipRepository};
    /// use service::ship::domain::ShipInput;
    /// use std::sync::Arc;
    /// let svc = ShipService::new(Arc::new(MockShipRepository::default()));
    /// let input = ShipInput {
    ///     name: Some("Orion".into()),
    ///     planet: Some("Mars".into()),
    ///     ship_type: Some(ShipType::Military),
    ///     prod_date: Some(Utc.with_ymd_and_hms(3019, 1, 1, 0, 0, 0).unwrap()),
    ///     is_used: None,
    ///     speed: Some(0.5),
    ///     crew_size: Some(10),
    /// };
    /// let ship = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(ship.id, 1);
    /// assert_eq!(ship.rating, 40.0);
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: ShipInput) -> Result<ship::Model, ServiceError> {
        let ship = input.into_new_ship()?;
        let saved = self.repo.create(ship).await?;
        info!(ship_id = saved.id, name = %saved.name, rating = saved.rating, "ship_created");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<ship::Model, ServiceError> {
        self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found("ship"))
    }

    /// Overwrite the fields present in `input` and recompute the rating.
    /// A missing ship wins over an invalid payload.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: ShipInput) -> Result<ship::Model, ServiceError> {
        let mut ship = self.get(id).await?;
        input.validate()?;
        input.apply_to(&mut ship);
        ship.refresh_rating();
        let saved = self.repo.update(ship).await?;
        info!(ship_id = saved.id, rating = saved.rating, "ship_updated");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("ship"));
        }
        info!(ship_id = id, "ship_deleted");
        Ok(())
    }
}
