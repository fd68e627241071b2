use chrono::Datelike;
use sea_orm::{
    entity::prelude::*, sea_query::StringLen, Condition, DatabaseConnection, NotSet, PaginatorTrait, QueryOrder, Set,
    Unchanged,
};
use serde::{Deserialize, Serialize};

use crate::{errors, rating};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ShipType {
    #[sea_orm(string_value = "TRANSPORT")]
    #[serde(rename = "TRANSPORT")]
    Transport,
    #[sea_orm(string_value = "MILITARY")]
    #[serde(rename = "MILITARY")]
    Military,
    #[sea_orm(string_value = "MERCHANT")]
    #[serde(rename = "MERCHANT")]
    Merchant,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ship")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub prod_date: DateTimeUtc,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    pub rating: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Overwrite `rating` from the current speed, used flag and production year.
    pub fn refresh_rating(&mut self) {
        self.rating = rating::compute(self.speed, self.is_used, self.prod_date.year());
    }
}

pub const NAME_MAX_LEN: usize = 50;
pub const PLANET_MAX_LEN: usize = 50;
pub const MIN_PROD_YEAR: i32 = 2800;
pub const MAX_PROD_YEAR: i32 = rating::CURRENT_YEAR;
pub const MIN_SPEED: f64 = 0.01;
pub const MAX_SPEED: f64 = 0.99;
pub const MIN_CREW_SIZE: i32 = 1;
pub const MAX_CREW_SIZE: i32 = 9999;

fn validate_len(field: &str, value: &str, max: usize) -> Result<(), errors::ModelError> {
    let len = value.chars().count();
    if len < 1 || len > max {
        return Err(errors::ModelError::Validation(format!("{field} length must be between 1 and {max}")));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    validate_len("name", name, NAME_MAX_LEN)
}

pub fn validate_planet(planet: &str) -> Result<(), errors::ModelError> {
    validate_len("planet", planet, PLANET_MAX_LEN)
}

pub fn validate_prod_date(prod_date: &DateTimeUtc) -> Result<(), errors::ModelError> {
    let year = prod_date.year();
    if !(MIN_PROD_YEAR..=MAX_PROD_YEAR).contains(&year) {
        return Err(errors::ModelError::Validation(format!(
            "prodDate year must be between {MIN_PROD_YEAR} and {MAX_PROD_YEAR}, got {year}"
        )));
    }
    Ok(())
}

pub fn validate_speed(speed: f64) -> Result<(), errors::ModelError> {
    if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(errors::ModelError::Validation(format!(
            "speed must be between {MIN_SPEED} and {MAX_SPEED}"
        )));
    }
    Ok(())
}

pub fn validate_crew_size(crew_size: i32) -> Result<(), errors::ModelError> {
    if !(MIN_CREW_SIZE..=MAX_CREW_SIZE).contains(&crew_size) {
        return Err(errors::ModelError::Validation(format!(
            "crewSize must be between {MIN_CREW_SIZE} and {MAX_CREW_SIZE}"
        )));
    }
    Ok(())
}

fn db_err(e: DbErr) -> errors::ModelError {
    errors::ModelError::Db(e.to_string())
}

/// Insert a ship; the id of `ship` is ignored and assigned by the database.
pub async fn insert(db: &DatabaseConnection, ship: Model) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: NotSet,
        name: Set(ship.name),
        planet: Set(ship.planet),
        ship_type: Set(ship.ship_type),
        prod_date: Set(ship.prod_date),
        is_used: Set(ship.is_used),
        speed: Set(ship.speed),
        crew_size: Set(ship.crew_size),
        rating: Set(ship.rating),
    };
    am.insert(db).await.map_err(db_err)
}

/// Write every column of `ship` to the row with the same id.
pub async fn save(db: &DatabaseConnection, ship: Model) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Unchanged(ship.id),
        name: Set(ship.name),
        planet: Set(ship.planet),
        ship_type: Set(ship.ship_type),
        prod_date: Set(ship.prod_date),
        is_used: Set(ship.is_used),
        speed: Set(ship.speed),
        crew_size: Set(ship.crew_size),
        rating: Set(ship.rating),
    };
    am.update(db).await.map_err(db_err)
}

pub async fn find(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(db_err)
}

/// Hard delete. Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(db_err)?;
    Ok(res.rows_affected > 0)
}

/// One page of ships matching `cond`, ascending by `order` and then by id.
pub async fn find_page(
    db: &DatabaseConnection,
    cond: Condition,
    order: Column,
    page_idx: u64,
    per_page: u64,
) -> Result<Vec<Model>, errors::ModelError> {
    let mut query = Entity::find().filter(cond).order_by_asc(order);
    if !matches!(order, Column::Id) {
        query = query.order_by_asc(Column::Id);
    }
    query.paginate(db, per_page).fetch_page(page_idx).await.map_err(db_err)
}

pub async fn count(db: &DatabaseConnection, cond: Condition) -> Result<u64, errors::ModelError> {
    Entity::find().filter(cond).count(db).await.map_err(db_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(year: i32) -> DateTimeUtc {
        Utc.with_ymd_and_hms(year, 6, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn name_and_planet_length_bounds() {
        assert!(validate_name("").is_err());
        assert!(validate_name("a").is_ok());
        assert!(validate_name(&"a".repeat(50)).is_ok());
        assert!(validate_name(&"a".repeat(51)).is_err());
        assert!(validate_planet("").is_err());
        assert!(validate_planet(&"p".repeat(51)).is_err());
        // counted in characters, not bytes
        assert!(validate_planet(&"ж".repeat(50)).is_ok());
    }

    #[test]
    fn prod_year_bounds() {
        assert!(validate_prod_date(&date(2799)).is_err());
        assert!(validate_prod_date(&date(2800)).is_ok());
        assert!(validate_prod_date(&date(3019)).is_ok());
        assert!(validate_prod_date(&date(3020)).is_err());
    }

    #[test]
    fn speed_bounds() {
        assert!(validate_speed(0.0).is_err());
        assert!(validate_speed(0.01).is_ok());
        assert!(validate_speed(0.99).is_ok());
        assert!(validate_speed(1.0).is_err());
        assert!(validate_speed(f64::NAN).is_err());
    }

    #[test]
    fn crew_size_bounds() {
        assert!(validate_crew_size(0).is_err());
        assert!(validate_crew_size(1).is_ok());
        assert!(validate_crew_size(9999).is_ok());
        assert!(validate_crew_size(10000).is_err());
    }

    #[test]
    fn refresh_rating_uses_current_fields() {
        let mut ship = Model {
            id: 1,
            name: "Orion".into(),
            planet: "Mars".into(),
            ship_type: ShipType::Military,
            prod_date: date(3019),
            is_used: false,
            speed: 0.5,
            crew_size: 10,
            rating: 0.0,
        };
        ship.refresh_rating();
        assert_eq!(ship.rating, 40.0);
        ship.is_used = true;
        ship.refresh_rating();
        assert_eq!(ship.rating, 20.0);
    }

    #[test]
    fn json_uses_camel_case_and_epoch_millis() {
        let ship = Model {
            id: 7,
            name: "Orion".into(),
            planet: "Mars".into(),
            ship_type: ShipType::Merchant,
            prod_date: Utc.timestamp_millis_opt(32_000_000_000_000).unwrap(),
            is_used: true,
            speed: 0.5,
            crew_size: 10,
            rating: 1.5,
        };
        let v = serde_json::to_value(&ship).unwrap();
        assert_eq!(v["shipType"], "MERCHANT");
        assert_eq!(v["prodDate"], 32_000_000_000_000i64);
        assert_eq!(v["isUsed"], true);
        assert_eq!(v["crewSize"], 10);
    }
}
