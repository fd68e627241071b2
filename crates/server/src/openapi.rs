use utoipa::{IntoParams, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Ship as returned by every ship endpoint. `prodDate` is epoch milliseconds.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ShipDoc {
    pub id: i64,
    pub name: String,
    pub planet: String,
    #[schema(example = "MILITARY")]
    pub ship_type: String,
    pub prod_date: i64,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    pub rating: f64,
}

/// Create payload (all fields but `isUsed` required) or partial update payload.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ShipInputDoc {
    pub name: Option<String>,
    pub planet: Option<String>,
    #[schema(example = "TRANSPORT")]
    pub ship_type: Option<String>,
    pub prod_date: Option<i64>,
    pub is_used: Option<bool>,
    pub speed: Option<f64>,
    pub crew_size: Option<i32>,
}

#[derive(IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ShipQueryDoc {
    /// Substring of the name
    pub name: Option<String>,
    /// Substring of the planet
    pub planet: Option<String>,
    /// TRANSPORT, MILITARY or MERCHANT
    pub ship_type: Option<String>,
    /// Earliest production date, epoch milliseconds
    pub after: Option<i64>,
    /// Latest production date, epoch milliseconds
    pub before: Option<i64>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}

#[derive(IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PageRequestDoc {
    /// ID, NAME, PLANET, DATE, SPEED, CREW_SIZE or RATING (default ID)
    pub order: Option<String>,
    /// 0-based page index (default 0)
    pub page_number: Option<u64>,
    /// Records per page (default 3)
    pub page_size: Option<u64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::ships::list,
        crate::routes::ships::count,
        crate::routes::ships::create,
        crate::routes::ships::get,
        crate::routes::ships::update,
        crate::routes::ships::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ShipDoc,
            ShipInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "ships")
    )
)]
pub struct ApiDoc;
