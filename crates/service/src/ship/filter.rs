//! Predicate builder for ship listings.
//!
//! Every `by_*` function looks at the parameters of one dimension and returns
//! `None` when all of them are absent. [`ShipFilter`] ANDs whatever is left.
//! A filter can be lowered to a SeaORM [`Condition`] or evaluated in memory,
//! and both paths give the same answer. Substring matches are literal and
//! case-sensitive on every backend, so they are not expressed with `LIKE`.

use chrono::{DateTime, Timelike};
use models::ship::{self, ShipType};
use sea_orm::prelude::DateTimeUtc;
use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr, Value};
use sea_orm::{ColumnTrait, Condition, DbBackend};

use crate::errors::ServiceError;
use crate::ship::domain::ShipQuery;

/// Inclusive bound on a single column.
#[derive(Clone, Debug, PartialEq)]
pub enum Range<T> {
    AtLeast(T),
    AtMost(T),
    Between(T, T),
}

impl<T> Range<T> {
    /// `None` when both ends are open.
    pub fn new(min: Option<T>, max: Option<T>) -> Option<Self> {
        match (min, max) {
            (None, None) => None,
            (Some(lo), None) => Some(Range::AtLeast(lo)),
            (None, Some(hi)) => Some(Range::AtMost(hi)),
            (Some(lo), Some(hi)) => Some(Range::Between(lo, hi)),
        }
    }
}

impl<T: PartialOrd> Range<T> {
    pub fn contains(&self, value: &T) -> bool {
        match self {
            Range::AtLeast(lo) => value >= lo,
            Range::AtMost(hi) => value <= hi,
            Range::Between(lo, hi) => value >= lo && value <= hi,
        }
    }
}

impl<T: Clone + Into<Value>> Range<T> {
    fn to_expr(&self, col: ship::Column) -> SimpleExpr {
        match self {
            Range::AtLeast(lo) => col.gte(lo.clone()),
            Range::AtMost(hi) => col.lte(hi.clone()),
            Range::Between(lo, hi) => col.between(lo.clone(), hi.clone()),
        }
    }
}

/// One constrained dimension.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    NameContains(String),
    PlanetContains(String),
    ShipTypeIs(ShipType),
    ProdDate(Range<DateTimeUtc>),
    IsUsed(bool),
    Speed(Range<f64>),
    CrewSize(Range<i32>),
    Rating(Range<f64>),
}

/// `position(needle in col) > 0` spelled for the backend: `strpos` on Postgres, `instr` elsewhere.
fn contains_expr(col: ship::Column, needle: &str, backend: DbBackend) -> SimpleExpr {
    let func = match backend {
        DbBackend::Postgres => "strpos",
        _ => "instr",
    };
    let call = Func::cust(Alias::new(func))
        .arg(Expr::col((ship::Entity, col)))
        .arg(needle.to_owned());
    Expr::expr(call).gt(0)
}

impl Predicate {
    pub fn to_expr(&self, backend: DbBackend) -> SimpleExpr {
        match self {
            Predicate::NameContains(s) => contains_expr(ship::Column::Name, s, backend),
            Predicate::PlanetContains(s) => contains_expr(ship::Column::Planet, s, backend),
            Predicate::ShipTypeIs(t) => ship::Column::ShipType.eq(*t),
            Predicate::ProdDate(r) => r.to_expr(ship::Column::ProdDate),
            Predicate::IsUsed(b) => ship::Column::IsUsed.eq(*b),
            Predicate::Speed(r) => r.to_expr(ship::Column::Speed),
            Predicate::CrewSize(r) => r.to_expr(ship::Column::CrewSize),
            Predicate::Rating(r) => r.to_expr(ship::Column::Rating),
        }
    }

    pub fn matches(&self, ship: &ship::Model) -> bool {
        match self {
            Predicate::NameContains(s) => ship.name.contains(s.as_str()),
            Predicate::PlanetContains(s) => ship.planet.contains(s.as_str()),
            Predicate::ShipTypeIs(t) => ship.ship_type == *t,
            Predicate::ProdDate(r) => r.contains(&ship.prod_date),
            Predicate::IsUsed(b) => ship.is_used == *b,
            Predicate::Speed(r) => r.contains(&ship.speed),
            Predicate::CrewSize(r) => r.contains(&ship.crew_size),
            Predicate::Rating(r) => r.contains(&ship.rating),
        }
    }
}

pub fn by_name(name: Option<&str>) -> Option<Predicate> {
    name.map(|s| Predicate::NameContains(s.to_string()))
}

pub fn by_planet(planet: Option<&str>) -> Option<Predicate> {
    planet.map(|s| Predicate::PlanetContains(s.to_string()))
}

pub fn by_ship_type(ship_type: Option<ShipType>) -> Option<Predicate> {
    ship_type.map(Predicate::ShipTypeIs)
}

fn from_millis(field: &str, ms: i64) -> Result<DateTimeUtc, ServiceError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| ServiceError::validation(format!("{field} is not a representable timestamp")))
}

/// Move `before` back to hour 0 of its half of the day on a 12-hour clock.
/// Minutes, seconds and milliseconds are kept, so 15:40 becomes 12:40 and 09:40 becomes 00:40.
pub fn truncate_upper_bound(before: DateTimeUtc) -> DateTimeUtc {
    let hour = before.hour();
    before.with_hour(hour - hour % 12).unwrap_or(before)
}

/// Production-date window from epoch milliseconds.
/// Only when both ends are given is the upper end truncated (see [`truncate_upper_bound`]).
pub fn by_prod_date(after: Option<i64>, before: Option<i64>) -> Result<Option<Predicate>, ServiceError> {
    let after = after.map(|ms| from_millis("after", ms)).transpose()?;
    let before = before.map(|ms| from_millis("before", ms)).transpose()?;
    let range = match (after, before) {
        (Some(lo), Some(hi)) => Range::new(Some(lo), Some(truncate_upper_bound(hi))),
        (lo, hi) => Range::new(lo, hi),
    };
    Ok(range.map(Predicate::ProdDate))
}

pub fn by_use(is_used: Option<bool>) -> Option<Predicate> {
    is_used.map(Predicate::IsUsed)
}

pub fn by_speed(min: Option<f64>, max: Option<f64>) -> Option<Predicate> {
    Range::new(min, max).map(Predicate::Speed)
}

pub fn by_crew_size(min: Option<i32>, max: Option<i32>) -> Option<Predicate> {
    Range::new(min, max).map(Predicate::CrewSize)
}

pub fn by_rating(min: Option<f64>, max: Option<f64>) -> Option<Predicate> {
    Range::new(min, max).map(Predicate::Rating)
}

/// Conjunction of predicates. The empty filter matches every ship.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShipFilter {
    predicates: Vec<Predicate>,
}

impl ShipFilter {
    pub fn all() -> Self { Self::default() }

    pub fn and(mut self, predicate: Option<Predicate>) -> Self {
        self.predicates.extend(predicate);
        self
    }

    pub fn from_query(q: &ShipQuery) -> Result<Self, ServiceError> {
        Ok(ShipFilter::all()
            .and(by_name(q.name.as_deref()))
            .and(by_planet(q.planet.as_deref()))
            .and(by_ship_type(q.ship_type))
            .and(by_prod_date(q.after, q.before)?)
            .and(by_use(q.is_used))
            .and(by_speed(q.min_speed, q.max_speed))
            .and(by_crew_size(q.min_crew_size, q.max_crew_size))
            .and(by_rating(q.min_rating, q.max_rating)))
    }

    pub fn predicates(&self) -> &[Predicate] { &self.predicates }

    pub fn is_unconstrained(&self) -> bool { self.predicates.is_empty() }

    pub fn condition(&self, backend: DbBackend) -> Condition {
        self.predicates
            .iter()
            .fold(Condition::all(), |cond, p| cond.add(p.to_expr(backend)))
    }

    pub fn matches(&self, ship: &ship::Model) -> bool {
        self.predicates.iter().all(|p| p.matches(ship))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ship(name: &str, planet: &str, speed: f64, crew: i32, year: i32) -> ship::Model {
        let mut m = ship::Model {
            id: 1,
            name: name.into(),
            planet: planet.into(),
            ship_type: ShipType::Transport,
            prod_date: Utc.with_ymd_and_hms(year, 5, 5, 0, 0, 0).unwrap(),
            is_used: false,
            speed,
            crew_size: crew,
            rating: 0.0,
        };
        m.refresh_rating();
        m
    }

    #[test]
    fn absent_parameters_give_no_constraint() {
        assert!(by_name(None).is_none());
        assert!(by_planet(None).is_none());
        assert!(by_ship_type(None).is_none());
        assert!(by_prod_date(None, None).unwrap().is_none());
        assert!(by_use(None).is_none());
        assert!(by_speed(None, None).is_none());
        assert!(by_crew_size(None, None).is_none());
        assert!(by_rating(None, None).is_none());
        let f = ShipFilter::from_query(&ShipQuery::default()).unwrap();
        assert!(f.is_unconstrained());
        assert!(f.matches(&ship("x", "y", 0.5, 1, 3000)));
    }

    #[test]
    fn ranges_are_inclusive_and_one_sided() {
        assert_eq!(Range::new(Some(1), None), Some(Range::AtLeast(1)));
        assert_eq!(Range::new(None, Some(9)), Some(Range::AtMost(9)));
        let r = Range::new(Some(0.5), Some(0.9)).unwrap();
        assert!(r.contains(&0.5));
        assert!(r.contains(&0.9));
        assert!(!r.contains(&0.91));
        assert!(Range::AtLeast(10).contains(&10));
        assert!(!Range::AtMost(10).contains(&11));
    }

    #[test]
    fn substring_match_is_case_sensitive() {
        let p = by_name(Some("rio")).unwrap();
        assert!(p.matches(&ship("Orion", "Mars", 0.5, 1, 3000)));
        assert!(!p.matches(&ship("ORION", "Mars", 0.5, 1, 3000)));
        let p = by_planet(Some("ar")).unwrap();
        assert!(p.matches(&ship("Orion", "Mars", 0.5, 1, 3000)));
    }

    #[test]
    fn substring_sql_avoids_like_wildcards() {
        use sea_orm::{EntityTrait, QueryFilter, QueryTrait};
        let f = ShipFilter::all().and(by_name(Some("a_%")));
        let pg = ship::Entity::find().filter(f.condition(DbBackend::Postgres)).build(DbBackend::Postgres).to_string();
        assert!(pg.contains("strpos(") && pg.contains("'a_%'"), "{pg}");
        let lite = ship::Entity::find().filter(f.condition(DbBackend::Sqlite)).build(DbBackend::Sqlite).to_string();
        assert!(lite.contains("instr(") && lite.contains("'a_%'"), "{lite}");
        assert!(!pg.contains(" LIKE ") && !lite.contains(" LIKE "));
    }

    #[test]
    fn predicates_combine_with_and() {
        let q = ShipQuery {
            min_speed: Some(0.5),
            max_speed: Some(0.9),
            max_crew_size: Some(100),
            ..Default::default()
        };
        let f = ShipFilter::from_query(&q).unwrap();
        assert_eq!(f.predicates().len(), 2);
        assert!(f.matches(&ship("a", "b", 0.6, 50, 3000)));
        assert!(!f.matches(&ship("a", "b", 0.6, 500, 3000)));
        assert!(!f.matches(&ship("a", "b", 0.4, 50, 3000)));
    }

    #[test]
    fn upper_bound_truncation_keeps_minutes() {
        let pm = Utc.with_ymd_and_hms(3000, 1, 1, 15, 40, 12).unwrap();
        assert_eq!(truncate_upper_bound(pm), Utc.with_ymd_and_hms(3000, 1, 1, 12, 40, 12).unwrap());
        let am = Utc.with_ymd_and_hms(3000, 1, 1, 9, 5, 0).unwrap();
        assert_eq!(truncate_upper_bound(am), Utc.with_ymd_and_hms(3000, 1, 1, 0, 5, 0).unwrap());
        let midnight = Utc.with_ymd_and_hms(3000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(truncate_upper_bound(midnight), midnight);
    }

    #[test]
    fn prod_date_window_truncates_only_with_both_ends() {
        let after = Utc.with_ymd_and_hms(3000, 1, 1, 0, 0, 0).unwrap();
        let before = Utc.with_ymd_and_hms(3005, 1, 1, 10, 0, 0).unwrap();
        let both = by_prod_date(Some(after.timestamp_millis()), Some(before.timestamp_millis())).unwrap();
        assert_eq!(
            both,
            Some(Predicate::ProdDate(Range::Between(after, Utc.with_ymd_and_hms(3005, 1, 1, 0, 0, 0).unwrap())))
        );
        let only_before = by_prod_date(None, Some(before.timestamp_millis())).unwrap();
        assert_eq!(only_before, Some(Predicate::ProdDate(Range::AtMost(before))));
        let only_after = by_prod_date(Some(after.timestamp_millis()), None).unwrap();
        assert_eq!(only_after, Some(Predicate::ProdDate(Range::AtLeast(after))));
    }

    #[test]
    fn unrepresentable_timestamp_is_rejected() {
        assert!(matches!(by_prod_date(Some(i64::MAX), None), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn used_flag_and_type_are_equality() {
        let mut s = ship("a", "b", 0.5, 1, 3000);
        assert!(by_use(Some(false)).unwrap().matches(&s));
        s.is_used = true;
        assert!(!by_use(Some(false)).unwrap().matches(&s));
        assert!(by_ship_type(Some(ShipType::Transport)).unwrap().matches(&s));
        assert!(!by_ship_type(Some(ShipType::Merchant)).unwrap().matches(&s));
    }
}
