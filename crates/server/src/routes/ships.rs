use std::sync::Arc;

use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, State},
    Json,
};
use models::ship;
use service::pagination::PageRequest;
use service::ship::domain::{ShipInput, ShipQuery};
use service::ship::parse_id;
use service::ship::repo::seaorm::SeaOrmShipRepository;
use service::ship::ShipService;
use tracing::info;

use crate::errors::JsonApiError;

#[derive(Clone)]
pub struct ServerState {
    pub ships: Arc<ShipService<SeaOrmShipRepository>>,
}

impl ServerState {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmShipRepository::new(db));
        Self { ships: Arc::new(ShipService::new(repo)) }
    }
}

// Malformed query strings and bodies are client errors, reported like validation failures.
fn query<T>(q: Result<Query<T>, QueryRejection>) -> Result<T, JsonApiError> {
    q.map(|Query(v)| v).map_err(|e| JsonApiError::bad_request(e.body_text()))
}

fn body<T>(b: Result<Json<T>, JsonRejection>) -> Result<T, JsonApiError> {
    b.map(|Json(v)| v).map_err(|e| JsonApiError::bad_request(e.body_text()))
}

#[utoipa::path(
    get, path = "/rest/ships", tag = "ships",
    params(crate::openapi::ShipQueryDoc, crate::openapi::PageRequestDoc),
    responses(
        (status = 200, description = "One page of matching ships", body = [crate::openapi::ShipDoc]),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    q: Result<Query<ShipQuery>, QueryRejection>,
    page: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<Vec<ship::Model>>, JsonApiError> {
    let (q, page) = (query(q)?, query(page)?);
    let ships = state.ships.list(&q, page).await?;
    info!(count = ships.len(), order = page.order.field_name(), page = page.page_number, "list ships");
    Ok(Json(ships))
}

#[utoipa::path(
    get, path = "/rest/ships/count", tag = "ships",
    params(crate::openapi::ShipQueryDoc),
    responses(
        (status = 200, description = "Number of matching ships", body = u64),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn count(
    State(state): State<ServerState>,
    q: Result<Query<ShipQuery>, QueryRejection>,
) -> Result<Json<u64>, JsonApiError> {
    let q = query(q)?;
    Ok(Json(state.ships.count(&q).await?))
}

#[utoipa::path(
    post, path = "/rest/ships", tag = "ships",
    request_body = crate::openapi::ShipInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ShipDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    input: Result<Json<ShipInput>, JsonRejection>,
) -> Result<Json<ship::Model>, JsonApiError> {
    let input = body(input)?;
    Ok(Json(state.ships.create(input).await?))
}

#[utoipa::path(
    get, path = "/rest/ships/{id}", tag = "ships",
    params(("id" = String, Path, description = "Positive integer ship id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::ShipDoc),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ship::Model>, JsonApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.ships.get(id).await?))
}

#[utoipa::path(
    post, path = "/rest/ships/{id}", tag = "ships",
    params(("id" = String, Path, description = "Positive integer ship id")),
    request_body = crate::openapi::ShipInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ShipDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    input: Result<Json<ShipInput>, JsonRejection>,
) -> Result<Json<ship::Model>, JsonApiError> {
    let id = parse_id(&id)?;
    let input = body(input)?;
    Ok(Json(state.ships.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/rest/ships/{id}", tag = "ships",
    params(("id" = String, Path, description = "Positive integer ship id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<(), JsonApiError> {
    let id = parse_id(&id)?;
    state.ships.delete(id).await?;
    Ok(())
}
