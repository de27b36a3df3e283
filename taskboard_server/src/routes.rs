use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequestParts, Path, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use taskboard::entity::{collection, task};
use taskboard::{
    CollectionWithTasks, CreateCollection, CreateTask, Error, Principal, TaskBoard, Urgency,
    resolve_principal,
};

use crate::identity::HeaderIdentity;
use crate::response::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub board: TaskBoard,
    pub identity: Arc<HeaderIdentity>,
}

impl AppState {
    pub fn new(board: TaskBoard, identity: HeaderIdentity) -> Self {
        Self {
            board,
            identity: Arc::new(identity),
        }
    }
}

/// The resolved caller of a request.
///
/// Handlers list it before any `Path` or `Json` argument so an anonymous
/// request is turned away with `401` before its input is looked at.
pub struct Caller(pub Principal);

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        Ok(Caller(
            resolve_principal(state.identity.as_ref(), &parts.headers).await?,
        ))
    }
}

fn malformed(field: &'static str, message: String) -> ApiError {
    ApiError(Error::ValidationFailed { field, message })
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(input)| input)
        .map_err(|rejection| malformed("body", rejection.body_text()))
}

fn path_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| malformed("id", rejection.body_text()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/collections", get(list_collections).post(create_collection))
        .route("/collections/:id", delete(delete_collection))
        .route("/tasks", post(create_task))
        .route("/tasks/:id/done", post(complete_task))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskView {
    #[serde(flatten)]
    task: task::Model,
    urgency: Option<Urgency>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressView {
    done: usize,
    total: usize,
    percent: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionView {
    #[serde(flatten)]
    collection: collection::Model,
    tasks: Vec<TaskView>,
    progress: ProgressView,
}

impl CollectionView {
    fn new(entry: CollectionWithTasks, now: DateTime<Utc>) -> Self {
        let progress = entry.progress();
        Self {
            collection: entry.collection,
            tasks: entry
                .tasks
                .into_iter()
                .map(|task| TaskView {
                    urgency: task.urgency(now),
                    task,
                })
                .collect(),
            progress: ProgressView {
                done: progress.done,
                total: progress.total,
                percent: progress.percent(),
            },
        }
    }
}

async fn list_collections(
    State(state): State<AppState>,
    Caller(principal): Caller,
) -> Result<Json<Vec<CollectionView>>, ApiError> {
    let now = Utc::now();
    let listed = state.board.list_collections(&principal).await?;
    Ok(Json(
        listed
            .into_iter()
            .map(|entry| CollectionView::new(entry, now))
            .collect(),
    ))
}

async fn create_collection(
    State(state): State<AppState>,
    Caller(principal): Caller,
    body: Result<Json<CreateCollection>, JsonRejection>,
) -> Result<(StatusCode, Json<collection::Model>), ApiError> {
    let input = json_body(body)?;
    let created = state.board.create_collection(&principal, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_collection(
    State(state): State<AppState>,
    Caller(principal): Caller,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<collection::Model>, ApiError> {
    let id = path_id(path)?;
    Ok(Json(state.board.delete_collection(&principal, id).await?))
}

async fn create_task(
    State(state): State<AppState>,
    Caller(principal): Caller,
    body: Result<Json<CreateTask>, JsonRejection>,
) -> Result<(StatusCode, Json<task::Model>), ApiError> {
    let input = json_body(body)?;
    let created = state.board.create_task(&principal, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn complete_task(
    State(state): State<AppState>,
    Caller(principal): Caller,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<task::Model>, ApiError> {
    let id = path_id(path)?;
    Ok(Json(state.board.complete_task(&principal, id).await?))
}
