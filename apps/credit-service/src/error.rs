//! # Credit Service エラー定義
//!
//! サービス固有のエラーと、HTTP レスポンスへの変換を定義する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use creditflow_domain::DomainError;
use creditflow_shared::ErrorResponse;
use thiserror::Error;

/// Credit Service で発生するエラー
#[derive(Debug, Error)]
pub enum AppError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 競合（一意制約違反）
    #[error("競合が発生しました: {0}")]
    Conflict(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] creditflow_infra::InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{entity_type}が見つかりません: {id}"))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self {
            AppError::NotFound(msg) => ErrorResponse::not_found(msg.clone()),
            AppError::BadRequest(msg) => ErrorResponse::bad_request(msg.clone()),
            AppError::Conflict(msg) => ErrorResponse::conflict(msg.clone()),
            AppError::Database(e) => {
                // 一意制約違反はユースケースの事前チェックをすり抜けた競合
                if let Some((entity, key)) = e.as_conflict() {
                    ErrorResponse::conflict(format!("{entity}が重複しています: {key}"))
                } else {
                    tracing::error!("データベースエラー: {}", e);
                    ErrorResponse::internal_error()
                }
            }
            AppError::Internal(msg) => {
                tracing::error!("内部エラー: {}", msg);
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}
