//! Sort key and page directive for ship listings.
//!
//! Pages are 0-based and default to 3 records; sorting is always ascending.

use std::cmp::Ordering;

use models::ship;
use serde::Deserialize;

use crate::errors::ServiceError;

pub const DEFAULT_PAGE_SIZE: u64 = 3;

/// Sort key accepted by the `order` query parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum ShipOrder {
    #[default]
    #[serde(rename = "ID", alias = "id")]
    Id,
    #[serde(rename = "NAME", alias = "name")]
    Name,
    #[serde(rename = "PLANET", alias = "planet")]
    Planet,
    #[serde(rename = "DATE", alias = "prodDate")]
    Date,
    #[serde(rename = "SPEED", alias = "speed")]
    Speed,
    #[serde(rename = "CREW_SIZE", alias = "crewSize")]
    CrewSize,
    #[serde(rename = "RATING", alias = "rating")]
    Rating,
}

impl ShipOrder {
    /// Name of the sorted field as it appears in JSON.
    pub fn field_name(self) -> &'static str {
        match self {
            ShipOrder::Id => "id",
            ShipOrder::Name => "name",
            ShipOrder::Planet => "planet",
            ShipOrder::Date => "prodDate",
            ShipOrder::Speed => "speed",
            ShipOrder::CrewSize => "crewSize",
            ShipOrder::Rating => "rating",
        }
    }

    pub fn column(self) -> ship::Column {
        match self {
            ShipOrder::Id => ship::Column::Id,
            ShipOrder::Name => ship::Column::Name,
            ShipOrder::Planet => ship::Column::Planet,
            ShipOrder::Date => ship::Column::ProdDate,
            ShipOrder::Speed => ship::Column::Speed,
            ShipOrder::CrewSize => ship::Column::CrewSize,
            ShipOrder::Rating => ship::Column::Rating,
        }
    }

    /// Ascending comparison on the sort key, ties broken by id.
    pub fn compare(self, a: &ship::Model, b: &ship::Model) -> Ordering {
        let primary = match self {
            ShipOrder::Id => Ordering::Equal,
            ShipOrder::Name => a.name.cmp(&b.name),
            ShipOrder::Planet => a.planet.cmp(&b.planet),
            ShipOrder::Date => a.prod_date.cmp(&b.prod_date),
            ShipOrder::Speed => a.speed.total_cmp(&b.speed),
            ShipOrder::CrewSize => a.crew_size.cmp(&b.crew_size),
            ShipOrder::Rating => a.rating.total_cmp(&b.rating),
        };
        primary.then(a.id.cmp(&b.id))
    }
}

/// Page directive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(default)]
    pub order: ShipOrder,
    /// 0-based page index
    #[serde(default)]
    pub page_number: u64,
    /// items per page
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page_size() -> u64 { DEFAULT_PAGE_SIZE }

impl Default for PageRequest {
    fn default() -> Self { Self { order: ShipOrder::Id, page_number: 0, page_size: DEFAULT_PAGE_SIZE } }
}

impl PageRequest {
    /// Check the directive and return `(page_idx, per_page)`.
    pub fn normalize(self) -> Result<(u64, u64), ServiceError> {
        if self.page_size == 0 {
            return Err(ServiceError::validation("pageSize must be at least 1"));
        }
        // LIMIT and OFFSET are bound as signed 64-bit integers
        let max = i64::MAX as u64;
        if self.page_size > max {
            return Err(ServiceError::validation("pageSize is out of range"));
        }
        match self.page_number.checked_mul(self.page_size) {
            Some(offset) if offset <= max => {}
            _ => return Err(ServiceError::validation("pageNumber is out of range")),
        }
        Ok((self.page_number, self.page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sane() {
        let d = PageRequest::default();
        assert_eq!(d.order, ShipOrder::Id);
        assert_eq!(d.page_number, 0);
        assert_eq!(d.page_size, 3);
    }

    #[test]
    fn normalize_rejects_empty_pages() {
        let p = PageRequest { page_size: 0, ..Default::default() };
        assert!(p.normalize().is_err());
    }

    #[test]
    fn normalize_rejects_overflowing_offsets() {
        let p = PageRequest { page_number: u64::MAX, page_size: 2, ..Default::default() };
        assert!(p.normalize().is_err());
        let p = PageRequest { page_number: i64::MAX as u64, page_size: 2, ..Default::default() };
        assert!(p.normalize().is_err());
        let p = PageRequest { page_size: u64::MAX, ..Default::default() };
        assert!(p.normalize().is_err());
        let edge = PageRequest { page_number: 1, page_size: i64::MAX as u64, ..Default::default() };
        assert!(edge.normalize().is_ok());
        let ok = PageRequest { page_number: 4, page_size: 10, ..Default::default() };
        assert_eq!(ok.normalize().unwrap(), (4, 10));
    }

    #[test]
    fn order_accepts_names_and_field_aliases() {
        let o: ShipOrder = serde_json::from_str("\"DATE\"").unwrap();
        assert_eq!(o, ShipOrder::Date);
        let o: ShipOrder = serde_json::from_str("\"crewSize\"").unwrap();
        assert_eq!(o, ShipOrder::CrewSize);
        assert!(serde_json::from_str::<ShipOrder>("\"COLOR\"").is_err());
        assert_eq!(ShipOrder::Date.field_name(), "prodDate");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let p: PageRequest = serde_json::from_str(r#"{"order":"SPEED"}"#).unwrap();
        assert_eq!(p.order, ShipOrder::Speed);
        assert_eq!(p.page_size, 3);
    }
}
