//! # クレジット API ハンドラ
//!
//! クレジットの保存・一覧・コード照会エンドポイントを実装する。
//!
//! 一覧はコードと金額のみのサマリー、コード照会は全フィールドの
//! 詳細 DTO を返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use creditflow_domain::{
    credit::{Credit, CreditCode},
    customer::CustomerId,
    value_objects::{CreditValue, InstallmentCount},
};
use creditflow_shared::ApiResponse;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppError,
    usecase::{CreditUseCaseImpl, SaveCreditInput},
};

/// クレジットハンドラーの State
pub struct CreditState {
    pub usecase: CreditUseCaseImpl,
}

/// クレジット保存リクエスト
#[derive(Debug, Deserialize)]
pub struct SaveCreditRequest {
    pub credit_value:           Decimal,
    pub day_first_installment:  NaiveDate,
    pub number_of_installments: i32,
    pub customer_id:            Uuid,
}

/// 所有顧客を指定するクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct CustomerQuery {
    pub customer_id: Uuid,
}

/// クレジットサマリー DTO（一覧用）
#[derive(Debug, Serialize)]
pub struct CreditSummaryDto {
    pub credit_code:            Uuid,
    pub credit_value:           Decimal,
    pub number_of_installments: i32,
}

impl From<Credit> for CreditSummaryDto {
    fn from(credit: Credit) -> Self {
        Self {
            credit_code:            *credit.credit_code().as_uuid(),
            credit_value:           credit.credit_value().as_decimal(),
            number_of_installments: credit.number_of_installments().as_i32(),
        }
    }
}

/// クレジット詳細 DTO
#[derive(Debug, Serialize)]
pub struct CreditDto {
    pub credit_code:            Uuid,
    pub credit_value:           Decimal,
    pub day_first_installment:  NaiveDate,
    pub number_of_installments: i32,
    pub status:                 String,
    pub customer_id:            Uuid,
}

impl From<Credit> for CreditDto {
    fn from(credit: Credit) -> Self {
        Self {
            credit_code:            *credit.credit_code().as_uuid(),
            credit_value:           credit.credit_value().as_decimal(),
            day_first_installment:  credit.day_first_installment(),
            number_of_installments: credit.number_of_installments().as_i32(),
            status:                 credit.status().to_string(),
            customer_id:            *credit.customer_id().as_uuid(),
        }
    }
}

/// クレジットを保存する
///
/// ## エンドポイント
/// POST /api/credits
#[tracing::instrument(skip_all)]
pub async fn save_credit(
    State(state): State<Arc<CreditState>>,
    Json(request): Json<SaveCreditRequest>,
) -> Result<Response, AppError> {
    let input = SaveCreditInput {
        credit_value:           CreditValue::new(request.credit_value)?,
        day_first_installment:  request.day_first_installment,
        number_of_installments: InstallmentCount::new(request.number_of_installments)?,
        customer_id:            CustomerId::from_uuid(request.customer_id),
    };

    let credit = state.usecase.save_credit(input).await?;

    let response = ApiResponse::new(CreditDto::from(credit));

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// 顧客のクレジットを一覧する
///
/// ## エンドポイント
/// GET /api/credits?customer_id={customer_id}
#[tracing::instrument(skip_all)]
pub async fn list_credits(
    State(state): State<Arc<CreditState>>,
    Query(query): Query<CustomerQuery>,
) -> Result<Response, AppError> {
    let credits = state
        .usecase
        .list_credits_by_customer(&CustomerId::from_uuid(query.customer_id))
        .await?;

    let response = ApiResponse::new(
        credits
            .into_iter()
            .map(CreditSummaryDto::from)
            .collect::<Vec<_>>(),
    );

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// クレジットコードでクレジットを照会する
///
/// 所有者が一致しない場合はコードの存在を漏らさないよう
/// 404 を返す。
///
/// ## エンドポイント
/// GET /api/credits/{credit_code}?customer_id={customer_id}
#[tracing::instrument(skip_all)]
pub async fn find_credit_by_code(
    State(state): State<Arc<CreditState>>,
    Path(credit_code): Path<Uuid>,
    Query(query): Query<CustomerQuery>,
) -> Result<Response, AppError> {
    let credit = state
        .usecase
        .find_credit_by_code(
            &CustomerId::from_uuid(query.customer_id),
            &CreditCode::from_uuid(credit_code),
        )
        .await?;

    let response = ApiResponse::new(CreditDto::from(credit));

    Ok((StatusCode::OK, Json(response)).into_response())
}
