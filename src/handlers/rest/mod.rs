use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_macros::debug_handler;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::{any::Any, sync::Arc};

use crate::{
    dto::{
        CreateNoteRequest, DeleteNoteQuery, DeleteNoteResponse, ErrorResponse, NoteResponse,
        UpdateNoteRequest,
    },
    error::ApiError,
    service::NoteService,
};

#[derive(OpenApi)]
#[openapi(
    paths(list_notes, create_note, update_note, delete_note),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        DeleteNoteResponse,
        ErrorResponse
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

pub fn router(service: Arc<NoteService>) -> Router {
    serve(routes(), service)
}

fn routes() -> Router<Arc<NoteService>> {
    Router::new()
        .route("/", get(root))
        .route(
            "/notes",
            get(list_notes)
                .post(create_note)
                .put(update_note)
                .delete(delete_note),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
}

fn serve(routes: Router<Arc<NoteService>>, service: Arc<NoteService>) -> Router {
    routes
        .with_state(service)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Response {
    (StatusCode::OK, "Notes server is running").into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    tracing::error!("request handler panicked: {}", details);
    ApiError::Internal("Internal server error").into_response()
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "All notes in insertion order", body = Vec<NoteResponse>)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn list_notes(State(service): State<Arc<NoteService>>) -> Response {
    let notes = service.get_all_notes().await;
    (StatusCode::OK, Json(notes)).into_response()
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 200, description = "Note created successfully", body = NoteResponse),
        (status = 500, description = "Request could not be processed", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(request)) => {
            let note = service.create_note(request).await;
            tracing::info!("created note {}", note.id);
            (StatusCode::OK, Json(note)).into_response()
        }
        Err(e) => {
            tracing::error!("failed to create note entry: {}", e);
            ApiError::Internal("Failed to create note").into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/notes",
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Request could not be processed", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(e) => {
            tracing::error!("failed to update note entry: {}", e);
            return ApiError::Internal("Failed to update note").into_response();
        }
    };

    let id = request.id.clone();
    match service.update_note(request).await {
        Some(note) => (StatusCode::OK, Json(note)).into_response(),
        None => {
            tracing::warn!("update requested for unknown note {:?}", id);
            ApiError::NotFound.into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/notes",
    params(DeleteNoteQuery),
    responses(
        (status = 200, description = "Note deleted successfully", body = DeleteNoteResponse),
        (status = 400, description = "Note ID missing", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(pairs)) => DeleteNoteQuery::from_pairs(pairs),
        Err(e) => {
            tracing::warn!("failed to parse delete query: {}", e);
            DeleteNoteQuery::default()
        }
    };

    let Some(id) = query.id.filter(|id| !id.is_empty()) else {
        tracing::warn!("delete requested without a note id");
        return ApiError::BadRequest("Note ID required").into_response();
    };

    if service.delete_note(&id).await {
        tracing::info!("deleted note {}", id);
        (StatusCode::OK, Json(DeleteNoteResponse { success: true })).into_response()
    } else {
        tracing::warn!("delete requested for unknown note {:?}", id);
        ApiError::NotFound.into_response()
    }
}
