//! # CreditRepository
//!
//! クレジット情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **コードによる照会**: 外部照会キーはクレジットコード（UUID v4）のみ。
//!   所有者チェックはユースケース層の責務
//! - **安定した並び順**: 顧客別一覧は作成日時の昇順で返す

use async_trait::async_trait;
use creditflow_domain::{
    credit::{Credit, CreditCode, CreditId, CreditStatus},
    customer::CustomerId,
    value_objects::{CreditValue, InstallmentCount},
};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::error::InfraError;

/// クレジットリポジトリトレイト
///
/// クレジット情報の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait CreditRepository: Send + Sync {
    /// クレジットを挿入する
    ///
    /// # エラー
    ///
    /// - クレジットコードの一意制約違反時は `Conflict`
    async fn insert(&self, credit: &Credit) -> Result<(), InfraError>;

    /// 顧客のクレジット一覧を取得する
    ///
    /// 作成日時の昇順で返す。該当がない場合は空の Vec を返す（エラーではない）。
    async fn find_all_by_customer_id(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<Credit>, InfraError>;

    /// クレジットコードでクレジットを検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(credit))`: クレジットが見つかった場合
    /// - `Ok(None)`: クレジットが見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_credit_code(&self, code: &CreditCode) -> Result<Option<Credit>, InfraError>;
}

/// PostgreSQL 実装の CreditRepository
#[derive(Debug, Clone)]
pub struct PostgresCreditRepository {
    pool: PgPool,
}

impl PostgresCreditRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_CREDIT: &str = r#"
    SELECT
        id,
        credit_code,
        credit_value,
        day_first_installment,
        number_of_installments,
        status,
        customer_id,
        created_at
    FROM credits
"#;

/// DB の行をクレジットエンティティに復元する
fn credit_from_row(row: &PgRow) -> Result<Credit, InfraError> {
    let map_domain = |e: creditflow_domain::DomainError| InfraError::unexpected(e.to_string());

    Ok(Credit::from_db(
        CreditId::from_uuid(row.try_get("id")?),
        CreditCode::from_uuid(row.try_get("credit_code")?),
        CreditValue::new(row.try_get::<Decimal, _>("credit_value")?).map_err(map_domain)?,
        row.try_get("day_first_installment")?,
        InstallmentCount::new(row.try_get::<i32, _>("number_of_installments")?)
            .map_err(map_domain)?,
        row.try_get::<String, _>("status")?
            .parse::<CreditStatus>()
            .map_err(map_domain)?,
        CustomerId::from_uuid(row.try_get("customer_id")?),
        row.try_get("created_at")?,
    ))
}

#[async_trait]
impl CreditRepository for PostgresCreditRepository {
    async fn insert(&self, credit: &Credit) -> Result<(), InfraError> {
        let status: &str = credit.status().into();
        let result = sqlx::query(
            r#"
            INSERT INTO credits (
                id, credit_code, credit_value, day_first_installment,
                number_of_installments, status, customer_id, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(credit.id().as_uuid())
        .bind(credit.credit_code().as_uuid())
        .bind(credit.credit_value().as_decimal())
        .bind(credit.day_first_installment())
        .bind(credit.number_of_installments().as_i32())
        .bind(status)
        .bind(credit.customer_id().as_uuid())
        .bind(credit.created_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(InfraError::conflict(
                "Credit",
                credit.credit_code().to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_all_by_customer_id(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<Credit>, InfraError> {
        let rows = sqlx::query(&format!(
            "{SELECT_CREDIT} WHERE customer_id = $1 ORDER BY created_at"
        ))
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(credit_from_row).collect()
    }

    async fn find_by_credit_code(&self, code: &CreditCode) -> Result<Option<Credit>, InfraError> {
        let row = sqlx::query(&format!("{SELECT_CREDIT} WHERE credit_code = $1"))
            .bind(code.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(credit_from_row).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresCreditRepository>();
    }
}
