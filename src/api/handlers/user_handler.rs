//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{is_valid_role, CreateUser, UpdateUser, UserResponse, UserRole};
use crate::errors::{AppError, AppResult};
use crate::services::UserService;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Given name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ana")]
    pub name: String,
    /// Family name
    #[validate(length(min = 1, message = "Surname is required"))]
    #[schema(example = "Torres")]
    pub surname: String,
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ana@example.com")]
    pub email: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Role; defaults to "user"
    #[schema(example = "user")]
    pub role: Option<String>,
}

/// User update request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New given name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    /// New family name
    #[validate(length(min = 1, message = "Surname cannot be empty"))]
    pub surname: Option<String>,
    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    /// New password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    /// New role
    pub role: Option<String>,
    /// Device to assign
    pub device_id: Option<Uuid>,
}

/// Device assignment request (user addressed by email)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignDeviceRequest {
    /// Email of the user to update
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Device to assign
    pub device_id: Uuid,
}

/// Password change request (user addressed by email)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    /// Email of the user to update
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// New password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Deletion request addressed by email
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteByEmailRequest {
    /// Email of the user to delete
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/device", patch(assign_device))
        .route("/password", patch(change_password))
        .route("/by-email", delete(delete_by_email))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

fn parse_role(role: Option<&str>) -> AppResult<Option<UserRole>> {
    match role {
        None => Ok(None),
        Some(role) if is_valid_role(role) => Ok(Some(UserRole::from(role))),
        Some(_) => Err(AppError::validation(
            "Invalid role. Must be 'user' or 'admin'",
        )),
    }
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let role = parse_role(payload.role.as_deref())?;

    let user = state
        .user_service
        .register(CreateUser {
            name: payload.name,
            surname: payload.surname,
            email: payload.email,
            password: payload.password,
            role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let role = parse_role(payload.role.as_deref())?;

    let user = state
        .user_service
        .update_user(
            id,
            UpdateUser {
                name: payload.name,
                surname: payload.surname,
                email: payload.email,
                password: payload.password,
                role,
                device_id: payload.device_id,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Assign a device to a user addressed by email
#[utoipa::path(
    patch,
    path = "/users/device",
    tag = "Users",
    request_body = AssignDeviceRequest,
    responses(
        (status = 200, description = "Device assigned", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn assign_device(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AssignDeviceRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .assign_device(&payload.email, payload.device_id)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Change a user's password, addressed by email
#[utoipa::path(
    patch,
    path = "/users/password",
    tag = "Users",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .change_password(&payload.email, &payload.password)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete user by ID
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.delete_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete user addressed by email
#[utoipa::path(
    delete,
    path = "/users/by-email",
    tag = "Users",
    request_body = DeleteByEmailRequest,
    responses(
        (status = 200, description = "User deleted", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_by_email(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<DeleteByEmailRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.delete_by_email(&payload.email).await?;
    Ok(Json(UserResponse::from(user)))
}
