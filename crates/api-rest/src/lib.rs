//! # API REST
//!
//! REST API implementation for DayTracker.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI documentation (`/openapi.json`, Swagger UI at `/docs` and ReDoc at `/redoc`; the
//!   UIs sit behind the default `swagger-ui` and `redoc` features)
//! - REST-specific concerns (JSON serialisation, status codes, CORS)
//!
//! Uses `api-shared` for request/response types and `daytracker-core` for entry operations.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

use api_shared::{
    CreateEntryReq, DeleteEntryRes, EntryRes, ErrorRes, HealthRes, HealthService,
    ListEntriesQuery, UpdateEntryReq,
};
use daytracker_core::{EntryError, EntryService};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    entry_service: EntryService,
}

impl AppState {
    pub fn new(entry_service: EntryService) -> Self {
        Self { entry_service }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DayTracker Diary API",
        description = "A small REST API to create and manage diary entries stored in CouchDB."
    ),
    paths(
        health,
        create_entry,
        read_entry,
        list_entries,
        update_entry,
        delete_entry
    ),
    components(schemas(
        HealthRes,
        EntryRes,
        CreateEntryReq,
        UpdateEntryReq,
        DeleteEntryRes,
        ErrorRes
    )),
    tags((name = "entries", description = "Diary entry management"))
)]
pub struct ApiDoc;

type ApiError = (StatusCode, Json<ErrorRes>);

const NOT_FOUND_DETAIL: &str = "Entry not found";

/// Builds the REST router over `entry_service`.
pub fn router(entry_service: EntryService) -> Router {
    let app = Router::new()
        .route("/health", get(health))
        .route("/entries", get(list_entries).post(create_entry))
        .route(
            "/entries/:id",
            get(read_entry).put(update_entry).delete(delete_entry),
        );

    with_redoc(with_docs(app))
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(entry_service))
}

#[cfg(feature = "swagger-ui")]
fn with_docs(app: Router<AppState>) -> Router<AppState> {
    use utoipa_swagger_ui::SwaggerUi;

    app.merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

#[cfg(not(feature = "swagger-ui"))]
fn with_docs(app: Router<AppState>) -> Router<AppState> {
    app.route("/openapi.json", get(openapi_json))
}

#[cfg(not(feature = "swagger-ui"))]
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(feature = "redoc")]
fn with_redoc(app: Router<AppState>) -> Router<AppState> {
    use utoipa_redoc::{Redoc, Servable};

    app.merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
}

#[cfg(not(feature = "redoc"))]
fn with_redoc(app: Router<AppState>) -> Router<AppState> {
    app
}

fn error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorRes {
            detail: detail.into(),
        }),
    )
}

/// Maps a core error onto an HTTP status.
///
/// Backend failures are logged and reported as a generic 500; the cause stays in the logs.
fn entry_error(context: &str, e: EntryError) -> ApiError {
    match e {
        EntryError::NotFound(_) => error(StatusCode::NOT_FOUND, NOT_FOUND_DETAIL),
        EntryError::InvalidInput(msg) => error(StatusCode::UNPROCESSABLE_ENTITY, msg),
        e => {
            tracing::error!("{} error: {:?}", context, e);
            error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Reports liveness and the storage backend picked at startup (`couchdb` or `memory`).
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(
        state.entry_service.backend_kind(),
    ))
}

#[utoipa::path(
    post,
    path = "/entries",
    tag = "entries",
    request_body = CreateEntryReq,
    responses(
        (status = 201, description = "Entry created", body = EntryRes),
        (status = 422, description = "Missing or empty required field"),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create a diary entry
///
/// Generates the entry id and, when `entry_date` is omitted, stamps the current server time.
/// Returns the created entry with its id and revision.
#[axum::debug_handler]
async fn create_entry(
    State(state): State<AppState>,
    Json(req): Json<CreateEntryReq>,
) -> Result<(StatusCode, Json<EntryRes>), ApiError> {
    let entry = state
        .entry_service
        .create(req.into())
        .await
        .map_err(|e| entry_error("Create entry", e))?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

#[utoipa::path(
    get,
    path = "/entries/{id}",
    tag = "entries",
    params(("id" = String, Path, description = "Entry id")),
    responses(
        (status = 200, description = "Entry found", body = EntryRes),
        (status = 404, description = "Entry not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Get an entry by its id
#[axum::debug_handler]
async fn read_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EntryRes>, ApiError> {
    match state.entry_service.get(&id).await {
        Ok(Some(entry)) => Ok(Json(entry.into())),
        Ok(None) => Err(error(StatusCode::NOT_FOUND, NOT_FOUND_DETAIL)),
        Err(e) => Err(entry_error("Read entry", e)),
    }
}

#[utoipa::path(
    get,
    path = "/entries",
    tag = "entries",
    params(ListEntriesQuery),
    responses(
        (status = 200, description = "Page of entries", body = [EntryRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List diary entries
///
/// Offset pagination with `skip` and `limit`. Pages are not a stable cursor: entries created
/// or deleted between calls can shift later pages.
#[axum::debug_handler]
async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> Result<Json<Vec<EntryRes>>, ApiError> {
    let entries = state
        .entry_service
        .list(query.skip, query.limit)
        .await
        .map_err(|e| entry_error("List entries", e))?;
    Ok(Json(entries.into_iter().map(EntryRes::from).collect()))
}

#[utoipa::path(
    put,
    path = "/entries/{id}",
    tag = "entries",
    params(("id" = String, Path, description = "Entry id")),
    request_body = UpdateEntryReq,
    responses(
        (status = 200, description = "Entry updated", body = EntryRes),
        (status = 404, description = "Entry not found", body = ErrorRes),
        (status = 422, description = "Empty title", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Update fields of a diary entry
///
/// Partial update: fields that are omitted or `null` keep their stored value.
#[axum::debug_handler]
async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateEntryReq>,
) -> Result<Json<EntryRes>, ApiError> {
    let entry = state
        .entry_service
        .update(&id, req.into())
        .await
        .map_err(|e| entry_error("Update entry", e))?;
    Ok(Json(entry.into()))
}

#[utoipa::path(
    delete,
    path = "/entries/{id}",
    tag = "entries",
    params(("id" = String, Path, description = "Entry id")),
    responses(
        (status = 200, description = "Entry deleted", body = DeleteEntryRes),
        (status = 404, description = "Entry not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Delete a diary entry by id
#[axum::debug_handler]
async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteEntryRes>, ApiError> {
    match state.entry_service.delete(&id).await {
        Ok(true) => Ok(Json(DeleteEntryRes { deleted: true })),
        Ok(false) => Err(error(StatusCode::NOT_FOUND, NOT_FOUND_DETAIL)),
        Err(e) => Err(entry_error("Delete entry", e)),
    }
}
