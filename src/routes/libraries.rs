use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::{
        validation::{validate_library_name, validate_library_paths},
        AppResult,
    },
    state::AppState,
    types::{
        CollectionType, CollectionTypeOption, CreateLibraryRequest, CreateLibraryResponse, LibraryOrderDto,
        MoveLibraryRequest, ScanOutcome,
    },
};

pub async fn get_page(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.page.view().await)
}

pub async fn get_order(State(state): State<AppState>) -> impl IntoResponse {
    Json(LibraryOrderDto { library_order: state.page.order().await })
}

pub async fn put_order(
    State(state): State<AppState>,
    Json(req): Json<LibraryOrderDto>,
) -> AppResult<Json<LibraryOrderDto>> {
    for name in &req.library_order {
        validate_library_name(name, "libraryOrder")?;
    }
    let library_order = state.page.replace_order(req.library_order).await?;
    Ok(Json(LibraryOrderDto { library_order }))
}

pub async fn move_library(
    State(state): State<AppState>,
    Json(req): Json<MoveLibraryRequest>,
) -> AppResult<Json<LibraryOrderDto>> {
    let library_order = state.page.move_library(&req.name, req.direction).await?;
    Ok(Json(LibraryOrderDto { library_order }))
}

pub async fn scan_all(State(state): State<AppState>) -> Response {
    match state.page.scan_all().await {
        outcome @ ScanOutcome::Requested { .. } => (StatusCode::ACCEPTED, Json(outcome)).into_response(),
        outcome @ ScanOutcome::Skipped => (StatusCode::OK, Json(outcome)).into_response(),
    }
}

pub async fn create_library(
    State(state): State<AppState>,
    Json(req): Json<CreateLibraryRequest>,
) -> AppResult<Json<CreateLibraryResponse>> {
    validate_library_name(&req.name, "name")?;
    validate_library_paths(&req.paths)?;
    let changed = state.page.add_library(&req).await;
    Ok(Json(CreateLibraryResponse { changed }))
}

pub async fn collection_types() -> impl IntoResponse {
    let options: Vec<CollectionTypeOption> = CollectionType::ALL
        .iter()
        .map(|t| CollectionTypeOption { value: *t, label: t.label().to_string() })
        .collect();
    Json(options)
}
