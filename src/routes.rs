//! REST resource for cars.
//!
//! | Method | Path | |
//! |--------|------|-|
//! | `POST` | `/api/cars` | create, 201 with `Location` |
//! | `PUT` | `/api/cars` | full update, id taken from the body |
//! | `GET` | `/api/cars` | list by criteria, paged |
//! | `GET` | `/api/cars/count` | count by criteria |
//! | `GET` | `/api/cars/{id}` | fetch one |
//! | `DELETE` | `/api/cars/{id}` | delete one |
//! | `GET` | `/api-docs/openapi.json` | OpenAPI document |

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::LOCATION},
    response::IntoResponse,
    routing::get,
};
use sea_orm::DatabaseConnection;
use utoipa::OpenApi;

use crate::entity::car::{self, CarCriteria, CarInput};
use crate::errors::ApiError;
use crate::pagination::{Pageable, pagination_headers};
use crate::params::parse_criteria;
use crate::query_service::QueryService;
use crate::service::{CarQueryService, CarService};

pub const CARS_PATH: &str = "/api/cars";

#[derive(OpenApi)]
#[openapi(
    paths(create_car, update_car, get_all_cars, count_cars, get_car, delete_car),
    components(schemas(car::Model, CarInput)),
    tags((name = "cars", description = "Car management with criteria filtering"))
)]
pub struct ApiDoc;

#[must_use]
pub fn router(db: DatabaseConnection) -> Router {
    Router::new()
        .route(CARS_PATH, get(get_all_cars).post(create_car).put(update_car))
        .route("/api/cars/count", get(count_cars))
        .route("/api/cars/{id}", get(get_car).delete(delete_car))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(db)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    post,
    path = "/api/cars",
    tag = "cars",
    request_body = CarInput,
    responses(
        (status = 201, description = "Car created", body = car::Model),
        (status = 400, description = "The body already carries an id")
    )
)]
pub async fn create_car(
    State(db): State<DatabaseConnection>,
    Json(input): Json<CarInput>,
) -> Result<impl IntoResponse, ApiError> {
    if input.id.is_some() {
        return Err(ApiError::bad_request("A new car cannot already have an ID"));
    }
    let created = CarService::create(&db, input).await?;
    let location = format!("{CARS_PATH}/{}", created.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/cars",
    tag = "cars",
    request_body = CarInput,
    responses(
        (status = 200, description = "Car updated", body = car::Model),
        (status = 400, description = "The body has no id"),
        (status = 404, description = "No car with that id")
    )
)]
pub async fn update_car(
    State(db): State<DatabaseConnection>,
    Json(input): Json<CarInput>,
) -> Result<Json<car::Model>, ApiError> {
    let Some(id) = input.id else {
        return Err(ApiError::bad_request("Invalid id"));
    };
    let updated = CarService::update(&db, id, input).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    get,
    path = "/api/cars",
    tag = "cars",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page index"),
        ("size" = Option<u64>, Query, description = "Page size, at most 2000"),
        ("sort" = Option<String>, Query, description = "property[,asc|desc], repeatable")
    ),
    responses(
        (status = 200, description = "Cars matching the criteria", body = [car::Model]),
        (status = 400, description = "A filter value could not be parsed")
    )
)]
pub async fn get_all_cars(
    State(db): State<DatabaseConnection>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<(HeaderMap, Json<Vec<car::Model>>), ApiError> {
    let criteria: CarCriteria = parse_criteria(&params)?;
    let pageable = Pageable::from_pairs(&params);
    let page = CarQueryService::find_page_by_criteria(&db, Some(&criteria), &pageable).await?;
    let headers = pagination_headers(CARS_PATH, &page);
    Ok((headers, Json(page.content)))
}

#[utoipa::path(
    get,
    path = "/api/cars/count",
    tag = "cars",
    responses(
        (status = 200, description = "Number of cars matching the criteria", body = u64),
        (status = 400, description = "A filter value could not be parsed")
    )
)]
pub async fn count_cars(
    State(db): State<DatabaseConnection>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<u64>, ApiError> {
    let criteria: CarCriteria = parse_criteria(&params)?;
    let count = CarQueryService::count_by_criteria(&db, Some(&criteria)).await?;
    Ok(Json(count))
}

#[utoipa::path(
    get,
    path = "/api/cars/{id}",
    tag = "cars",
    params(("id" = i64, Path, description = "Car id")),
    responses(
        (status = 200, description = "The car", body = car::Model),
        (status = 404, description = "No car with that id")
    )
)]
pub async fn get_car(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
) -> Result<Json<car::Model>, ApiError> {
    CarService::find_one(&db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Car", Some(id.to_string())))
}

#[utoipa::path(
    delete,
    path = "/api/cars/{id}",
    tag = "cars",
    params(("id" = i64, Path, description = "Car id")),
    responses(
        (status = 204, description = "Car deleted"),
        (status = 404, description = "No car with that id")
    )
)]
pub async fn delete_car(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    CarService::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
