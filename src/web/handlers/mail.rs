//! Mail handlers for the Web API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::mail::{Folder, MailService, SaveDraft, SendMail};
use crate::web::dto::{
    ApiResponse, IdResponse, MailListQuery, MailResponse, SaveDraftRequest, SendMailRequest,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// GET /api/mail - List the caller's mail in a folder (default: inbox).
pub async fn list_mail(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Query(query): Query<MailListQuery>,
) -> Result<Json<ApiResponse<Vec<MailResponse>>>, ApiError> {
    let folder = Folder::parse(query.folder.as_deref());
    let mails = MailService::new(state.db.pool())
        .list(&claims.identity(), folder)
        .await?;

    Ok(Json(ApiResponse::new(
        mails.into_iter().map(MailResponse::from).collect(),
    )))
}

/// GET /api/mail/:id - Get a single mail.
///
/// The body data is `null` when the caller has no registered address.
pub async fn get_mail(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Option<MailResponse>>>, ApiError> {
    let mail = MailService::new(state.db.pool())
        .get(&claims.identity(), id)
        .await?;

    Ok(Json(ApiResponse::new(mail.map(MailResponse::from))))
}

/// POST /api/mail - Send a mail, or file it as a draft.
pub async fn send_mail(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(request): Json<SendMailRequest>,
) -> Result<(StatusCode, Json<ApiResponse<IdResponse>>), ApiError> {
    let id = MailService::new(state.db.pool())
        .send(
            &claims.identity(),
            &SendMail {
                to: request.to,
                subject: request.subject,
                body: request.body,
                is_draft: request.is_draft,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(IdResponse { id })),
    ))
}

/// PUT /api/mail/draft - Save a draft, creating it when no id is given.
pub async fn save_draft(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(request): Json<SaveDraftRequest>,
) -> Result<Json<ApiResponse<IdResponse>>, ApiError> {
    let id = MailService::new(state.db.pool())
        .save_draft(
            &claims.identity(),
            &SaveDraft {
                id: request.id,
                to: request.to,
                subject: request.subject,
                body: request.body,
            },
        )
        .await?;

    Ok(Json(ApiResponse::new(IdResponse { id })))
}

/// DELETE /api/mail/:id - Soft-delete a mail.
pub async fn delete_mail(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<IdResponse>>, ApiError> {
    MailService::new(state.db.pool())
        .delete(&claims.identity(), id)
        .await?;

    Ok(Json(ApiResponse::new(IdResponse { id })))
}

/// POST /api/mail/:id/restore - Restore a soft-deleted mail.
pub async fn restore_mail(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<IdResponse>>, ApiError> {
    MailService::new(state.db.pool())
        .restore(&claims.identity(), id)
        .await?;

    Ok(Json(ApiResponse::new(IdResponse { id })))
}

/// POST /api/mail/:id/read - Mark a mail as read (recipient only).
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<IdResponse>>, ApiError> {
    MailService::new(state.db.pool())
        .mark_read(&claims.identity(), id)
        .await?;

    Ok(Json(ApiResponse::new(IdResponse { id })))
}
