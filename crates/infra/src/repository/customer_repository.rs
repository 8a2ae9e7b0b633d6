//! # CustomerRepository
//!
//! 顧客情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **一意制約の検出**: メールアドレス・税務 ID の一意制約違反を
//!   `InfraError::Conflict` に変換する
//! - **ドメイン経由の復元**: DB の行は必ずドメインのコンストラクタを
//!   通して復元し、不正な値の混入を防ぐ

use async_trait::async_trait;
use creditflow_domain::{
    customer::{Address, Customer, CustomerId, Email, FirstName, LastName, Street, TaxId, ZipCode},
    password::PasswordHash,
    value_objects::Income,
};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::error::InfraError;

/// 顧客リポジトリトレイト
///
/// 顧客情報の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// 顧客を挿入する
    ///
    /// # エラー
    ///
    /// - メールアドレスまたは税務 ID の一意制約違反時は `Conflict`
    async fn insert(&self, customer: &Customer) -> Result<(), InfraError>;

    /// ID で顧客を検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(customer))`: 顧客が見つかった場合
    /// - `Ok(None)`: 顧客が見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, InfraError>;

    /// メールアドレスで顧客を検索する
    ///
    /// 登録時の重複チェックに使用する。
    async fn find_by_email(&self, email: &Email) -> Result<Option<Customer>, InfraError>;

    /// 税務 ID で顧客を検索する
    ///
    /// 登録時の重複チェックに使用する。
    async fn find_by_tax_id(&self, tax_id: &TaxId) -> Result<Option<Customer>, InfraError>;

    /// 顧客の可変フィールド（氏名・住所・収入）を更新する
    async fn update(&self, customer: &Customer) -> Result<(), InfraError>;

    /// 顧客を削除する
    async fn delete(&self, id: &CustomerId) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の CustomerRepository
#[derive(Debug, Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_CUSTOMER: &str = r#"
    SELECT
        id,
        first_name,
        last_name,
        tax_id,
        email,
        password_hash,
        zip_code,
        street,
        income,
        created_at,
        updated_at
    FROM customers
"#;

/// DB の行を顧客エンティティに復元する
///
/// ドメインのバリデーションを通らない値が格納されていた場合は
/// `InfraError::Unexpected` を返す。
fn customer_from_row(row: &PgRow) -> Result<Customer, InfraError> {
    let map_domain = |e: creditflow_domain::DomainError| InfraError::unexpected(e.to_string());

    Ok(Customer::from_db(
        CustomerId::from_uuid(row.try_get("id")?),
        FirstName::new(row.try_get::<String, _>("first_name")?).map_err(map_domain)?,
        LastName::new(row.try_get::<String, _>("last_name")?).map_err(map_domain)?,
        TaxId::new(row.try_get::<String, _>("tax_id")?).map_err(map_domain)?,
        Email::new(row.try_get::<String, _>("email")?).map_err(map_domain)?,
        PasswordHash::new(row.try_get::<String, _>("password_hash")?),
        Address::new(
            ZipCode::new(row.try_get::<String, _>("zip_code")?).map_err(map_domain)?,
            Street::new(row.try_get::<String, _>("street")?).map_err(map_domain)?,
        ),
        Income::new(row.try_get::<Decimal, _>("income")?).map_err(map_domain)?,
        row.try_get("created_at")?,
        row.try_get("updated_at")?,
    ))
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn insert(&self, customer: &Customer) -> Result<(), InfraError> {
        let result = sqlx::query(
            r#"
            INSERT INTO customers (
                id, first_name, last_name, tax_id, email,
                password_hash, zip_code, street, income,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(customer.id().as_uuid())
        .bind(customer.first_name().as_str())
        .bind(customer.last_name().as_str())
        .bind(customer.tax_id().as_str())
        .bind(customer.email().as_str())
        .bind(customer.password_hash().as_str())
        .bind(customer.address().zip_code().as_str())
        .bind(customer.address().street().as_str())
        .bind(customer.income().as_decimal())
        .bind(customer.created_at())
        .bind(customer.updated_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(InfraError::conflict(
                "Customer",
                customer.email().as_str(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, InfraError> {
        let row = sqlx::query(&format!("{SELECT_CUSTOMER} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(customer_from_row).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Customer>, InfraError> {
        let row = sqlx::query(&format!("{SELECT_CUSTOMER} WHERE email = $1"))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(customer_from_row).transpose()
    }

    async fn find_by_tax_id(&self, tax_id: &TaxId) -> Result<Option<Customer>, InfraError> {
        let row = sqlx::query(&format!("{SELECT_CUSTOMER} WHERE tax_id = $1"))
            .bind(tax_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(customer_from_row).transpose()
    }

    async fn update(&self, customer: &Customer) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            UPDATE customers
            SET first_name = $2,
                last_name = $3,
                zip_code = $4,
                street = $5,
                income = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(customer.id().as_uuid())
        .bind(customer.first_name().as_str())
        .bind(customer.last_name().as_str())
        .bind(customer.address().zip_code().as_str())
        .bind(customer.address().street().as_str())
        .bind(customer.income().as_decimal())
        .bind(customer.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &CustomerId) -> Result<(), InfraError> {
        sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresCustomerRepository>();
    }
}
