use axum::{
    extract::{Path, State},
    Json,
};
use models::message::{Message, MessageInput};

use crate::errors::ApiError;
use crate::state::ServerState;

pub const HELLO: &str = "Hello from Quarkus REST";
pub const GOODBYE: &str = "Goodbye from Quarkus REST";
pub const HELLO_JSON: &str = "Hello from Quarkus REST in JSON";
pub const DELETED: &str = "Message deleted successfully";

#[utoipa::path(get, path = "/greeting/hello", tag = "greeting", responses((status = 200, description = "Static greeting", body = String)))]
pub async fn hello() -> &'static str {
    HELLO
}

#[utoipa::path(get, path = "/greeting/goodbye", tag = "greeting", responses((status = 200, description = "Static farewell", body = String)))]
pub async fn goodbye() -> &'static str {
    GOODBYE
}

/// 固定的 JSON 问候，id 恒为 0，不进入存储
#[utoipa::path(get, path = "/greeting/json", tag = "greeting", responses((status = 200, description = "Static JSON greeting", body = crate::openapi::MessageDoc)))]
pub async fn json_greeting() -> Json<Message> {
    Json(Message { id: 0, text: Some(HELLO_JSON.to_string()) })
}

#[utoipa::path(
    post, path = "/greeting/create", tag = "greeting",
    request_body = crate::openapi::MessageInputDoc,
    responses((status = 200, description = "Created", body = crate::openapi::MessageDoc))
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<MessageInput>,
) -> Result<Json<Message>, ApiError> {
    let created = state.messages.create(input).await?;
    Ok(Json(created))
}

#[utoipa::path(
    get, path = "/greeting/read", tag = "greeting",
    responses((status = 200, description = "All messages", body = [crate::openapi::MessageDoc]))
)]
pub async fn read_all(State(state): State<ServerState>) -> Json<Vec<Message>> {
    Json(state.messages.list().await)
}

#[utoipa::path(
    get, path = "/greeting/read/{id}", tag = "greeting",
    params(("id" = u64, Path, description = "Message id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::MessageDoc),
        (status = 404, description = "Message not found")
    )
)]
pub async fn read(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<Json<Message>, ApiError> {
    Ok(Json(state.messages.get(id).await?))
}

#[utoipa::path(
    put, path = "/greeting/update/{id}", tag = "greeting",
    params(("id" = u64, Path, description = "Message id")),
    request_body = crate::openapi::MessageInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MessageDoc),
        (status = 404, description = "Message not found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(input): Json<MessageInput>,
) -> Result<Json<Message>, ApiError> {
    Ok(Json(state.messages.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/greeting/delete/{id}", tag = "greeting",
    params(("id" = u64, Path, description = "Message id")),
    responses(
        (status = 200, description = "Message deleted successfully", body = String),
        (status = 404, description = "Message not found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<&'static str, ApiError> {
    state.messages.delete(id).await?;
    Ok(DELETED)
}
