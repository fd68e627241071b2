use models::ship::{self, ShipType};
use sea_orm::prelude::DateTimeUtc;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Create or update payload. On update every `None` leaves the stored value untouched.
/// `id` and `rating` keys in the incoming JSON are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipInput {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub prod_date: Option<DateTimeUtc>,
    pub is_used: Option<bool>,
    pub speed: Option<f64>,
    pub crew_size: Option<i32>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::validation(format!("{field} is required")))
}

impl ShipInput {
    /// Run the field validators over every field that is present.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(name) = &self.name {
            ship::validate_name(name)?;
        }
        if let Some(planet) = &self.planet {
            ship::validate_planet(planet)?;
        }
        if let Some(prod_date) = &self.prod_date {
            ship::validate_prod_date(prod_date)?;
        }
        if let Some(speed) = self.speed {
            ship::validate_speed(speed)?;
        }
        if let Some(crew_size) = self.crew_size {
            ship::validate_crew_size(crew_size)?;
        }
        Ok(())
    }

    /// Build a new, not yet persisted ship. All fields except `is_used` are required.
    /// The returned model has id 0 and a freshly computed rating.
    pub fn into_new_ship(self) -> Result<ship::Model, ServiceError> {
        let mut ship = ship::Model {
            id: 0,
            name: required(self.name, "name")?,
            planet: required(self.planet, "planet")?,
            ship_type: required(self.ship_type, "shipType")?,
            prod_date: required(self.prod_date, "prodDate")?,
            is_used: self.is_used.unwrap_or(false),
            speed: required(self.speed, "speed")?,
            crew_size: required(self.crew_size, "crewSize")?,
            rating: 0.0,
        };
        ShipInput::from(&ship).validate()?;
        ship.refresh_rating();
        Ok(ship)
    }

    /// Overwrite the fields of `ship` that are present in this payload.
    pub fn apply_to(self, ship: &mut ship::Model) {
        if let Some(name) = self.name {
            ship.name = name;
        }
        if let Some(planet) = self.planet {
            ship.planet = planet;
        }
        if let Some(ship_type) = self.ship_type {
            ship.ship_type = ship_type;
        }
        if let Some(prod_date) = self.prod_date {
            ship.prod_date = prod_date;
        }
        if let Some(is_used) = self.is_used {
            ship.is_used = is_used;
        }
        if let Some(speed) = self.speed {
            ship.speed = speed;
        }
        if let Some(crew_size) = self.crew_size {
            ship.crew_size = crew_size;
        }
    }
}

impl From<&ship::Model> for ShipInput {
    fn from(m: &ship::Model) -> Self {
        Self {
            name: Some(m.name.clone()),
            planet: Some(m.planet.clone()),
            ship_type: Some(m.ship_type),
            prod_date: Some(m.prod_date),
            is_used: Some(m.is_used),
            speed: Some(m.speed),
            crew_size: Some(m.crew_size),
        }
    }
}

/// Optional list filters, named as they appear in the query string.
/// `after` and `before` are epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipQuery {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    pub after: Option<i64>,
    pub before: Option<i64>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}
