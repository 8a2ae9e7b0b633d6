//! # 顧客 API ハンドラ
//!
//! 顧客の登録・取得・更新・削除エンドポイントを実装する。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use creditflow_domain::{
    customer::{
        Address,
        Customer,
        CustomerId,
        Email,
        FirstName,
        LastName,
        Street,
        TaxId,
        ZipCode,
    },
    password::PlainPassword,
    value_objects::Income,
};
use creditflow_shared::ApiResponse;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppError,
    usecase::{CreateCustomerInput, CustomerUseCaseImpl, UpdateCustomerInput},
};

/// 顧客ハンドラーの State
pub struct CustomerState {
    pub usecase: CustomerUseCaseImpl,
}

/// 顧客登録リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub first_name: String,
    pub last_name:  String,
    pub tax_id:     String,
    pub email:      String,
    pub password:   String,
    pub zip_code:   String,
    pub street:     String,
    pub income:     Decimal,
}

/// 顧客更新リクエスト（部分更新）
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub first_name: Option<String>,
    pub last_name:  Option<String>,
    pub zip_code:   Option<String>,
    pub street:     Option<String>,
    pub income:     Option<Decimal>,
}

/// 顧客 DTO
#[derive(Debug, Serialize)]
pub struct CustomerDto {
    pub id:         Uuid,
    pub first_name: String,
    pub last_name:  String,
    pub tax_id:     String,
    pub email:      String,
    pub zip_code:   String,
    pub street:     String,
    pub income:     Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerDto {
    fn from(customer: Customer) -> Self {
        Self {
            id:         *customer.id().as_uuid(),
            first_name: customer.first_name().as_str().to_string(),
            last_name:  customer.last_name().as_str().to_string(),
            tax_id:     customer.tax_id().as_str().to_string(),
            email:      customer.email().as_str().to_string(),
            zip_code:   customer.address().zip_code().as_str().to_string(),
            street:     customer.address().street().as_str().to_string(),
            income:     customer.income().as_decimal(),
            created_at: customer.created_at(),
            updated_at: customer.updated_at(),
        }
    }
}

/// 顧客を登録する
///
/// ## エンドポイント
/// POST /api/customers
#[tracing::instrument(skip_all)]
pub async fn create_customer(
    State(state): State<Arc<CustomerState>>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<Response, AppError> {
    let input = CreateCustomerInput {
        first_name: FirstName::new(request.first_name)?,
        last_name:  LastName::new(request.last_name)?,
        tax_id:     TaxId::new(request.tax_id)?,
        email:      Email::new(request.email)?,
        password:   PlainPassword::new(request.password)?,
        address:    Address::new(ZipCode::new(request.zip_code)?, Street::new(request.street)?),
        income:     Income::new(request.income)?,
    };

    let customer = state.usecase.create_customer(input).await?;

    let response = ApiResponse::new(CustomerDto::from(customer));

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// 顧客を取得する
///
/// ## エンドポイント
/// GET /api/customers/{customer_id}
#[tracing::instrument(skip_all)]
pub async fn get_customer(
    State(state): State<Arc<CustomerState>>,
    Path(customer_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let customer = state
        .usecase
        .get_customer(&CustomerId::from_uuid(customer_id))
        .await?;

    let response = ApiResponse::new(CustomerDto::from(customer));

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// 顧客情報を部分更新する
///
/// ## エンドポイント
/// PATCH /api/customers/{customer_id}
#[tracing::instrument(skip_all)]
pub async fn update_customer(
    State(state): State<Arc<CustomerState>>,
    Path(customer_id): Path<Uuid>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Response, AppError> {
    let address = match (request.zip_code, request.street) {
        (Some(zip_code), Some(street)) => {
            Some(Address::new(ZipCode::new(zip_code)?, Street::new(street)?))
        }
        (None, None) => None,
        _ => {
            return Err(AppError::BadRequest(
                "郵便番号と番地は同時に指定する必要があります".to_string(),
            ));
        }
    };

    let input = UpdateCustomerInput {
        customer_id: CustomerId::from_uuid(customer_id),
        first_name: request.first_name.map(FirstName::new).transpose()?,
        last_name: request.last_name.map(LastName::new).transpose()?,
        income: request.income.map(Income::new).transpose()?,
        address,
    };

    let customer = state.usecase.update_customer(input).await?;

    let response = ApiResponse::new(CustomerDto::from(customer));

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// 顧客を削除する
///
/// ## エンドポイント
/// DELETE /api/customers/{customer_id}
#[tracing::instrument(skip_all)]
pub async fn delete_customer(
    State(state): State<Arc<CustomerState>>,
    Path(customer_id): Path<Uuid>,
) -> Result<Response, AppError> {
    state
        .usecase
        .delete_customer(&CustomerId::from_uuid(customer_id))
        .await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
