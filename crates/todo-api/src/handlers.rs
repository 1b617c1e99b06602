use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::{Todo, TodoId};
use infrastructure::TodoStore;

use crate::error::{ApiError, Operation};
use crate::models::{CreateTodoRequest, HealthBody, UpdateTodoRequest};
use crate::router::AppState;

/// ヘルスチェック用ハンドラ
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthBody { status: "ok" }))
}

/// 一覧（新しい順）
pub async fn list_todos<S: TodoStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state
        .store()
        .list()
        .await
        .map_err(|e| ApiError::from_store(Operation::List, e))?;
    Ok(Json(todos))
}

/// 作成。タイトル検証はストア呼び出しより前に行う。
pub async fn create_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let op = Operation::Create;
    let Json(req) = payload.map_err(|e| ApiError::from_rejection(op, e))?;
    let fields = req.into_fields().map_err(|e| ApiError::from_domain(op, e))?;

    let todo = state
        .store()
        .insert(fields)
        .await
        .map_err(|e| ApiError::from_store(op, e))?;

    tracing::info!(todo_id = todo.id.as_str(), "Todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// 単一 Todo 取得
pub async fn get_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let op = Operation::Get;
    let id = parse_id(op, id)?;

    state
        .store()
        .find(&id)
        .await
        .map_err(|e| ApiError::from_store(op, e))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// 全置換による更新。作成時と同じ検証を行う。
pub async fn update_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let op = Operation::Update;
    let id = parse_id(op, id)?;
    let Json(req) = payload.map_err(|e| ApiError::from_rejection(op, e))?;
    let fields = req.into_fields().map_err(|e| ApiError::from_domain(op, e))?;

    state
        .store()
        .replace(&id, fields)
        .await
        .map_err(|e| ApiError::from_store(op, e))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// 物理削除
pub async fn delete_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let op = Operation::Delete;
    let id = parse_id(op, id)?;

    match state
        .store()
        .remove(&id)
        .await
        .map_err(|e| ApiError::from_store(op, e))?
    {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::NotFound),
    }
}

/// 未定義ルート
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// ルートはあるがメソッドが未対応
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

fn parse_id(op: Operation, id: Result<Path<String>, PathRejection>) -> Result<TodoId, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::from_path_rejection(op, e))?;
    TodoId::parse(&id).map_err(|e| ApiError::from_domain(op, e))
}
