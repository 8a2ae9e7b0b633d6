//! 顧客管理ユースケース

use std::sync::Arc;

use creditflow_domain::{
    clock::Clock,
    customer::{
        Address,
        Customer,
        CustomerId,
        Email,
        FirstName,
        LastName,
        NewCustomer,
        TaxId,
    },
    password::PlainPassword,
    value_objects::Income,
};
use creditflow_infra::{password::PasswordHasher, repository::CustomerRepository};

use crate::{error::AppError, usecase::helpers::FindResultExt as _};

/// 顧客作成の入力
pub struct CreateCustomerInput {
    pub first_name: FirstName,
    pub last_name:  LastName,
    pub tax_id:     TaxId,
    pub email:      Email,
    pub password:   PlainPassword,
    pub address:    Address,
    pub income:     Income,
}

/// 顧客更新の入力
///
/// 部分更新。`None` のフィールドは変更しない。
pub struct UpdateCustomerInput {
    pub customer_id: CustomerId,
    pub first_name:  Option<FirstName>,
    pub last_name:   Option<LastName>,
    pub income:      Option<Income>,
    pub address:     Option<Address>,
}

/// 顧客管理ユースケース
pub struct CustomerUseCaseImpl {
    customer_repository: Arc<dyn CustomerRepository>,
    password_hasher:     Arc<dyn PasswordHasher>,
    clock:               Arc<dyn Clock>,
}

impl CustomerUseCaseImpl {
    pub fn new(
        customer_repository: Arc<dyn CustomerRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            customer_repository,
            password_hasher,
            clock,
        }
    }

    /// 顧客を登録する
    ///
    /// 1. メールアドレスの重複チェック
    /// 2. 税務 ID の重複チェック
    /// 3. パスワードのハッシュ化（Argon2id）
    /// 4. Customer ドメインオブジェクト作成
    /// 5. customers テーブルに挿入
    pub async fn create_customer(&self, input: CreateCustomerInput) -> Result<Customer, AppError> {
        if self
            .customer_repository
            .find_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "このメールアドレスは既に使用されています".to_string(),
            ));
        }

        if self
            .customer_repository
            .find_by_tax_id(&input.tax_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "この税務 ID は既に使用されています".to_string(),
            ));
        }

        let password_hash = self.password_hasher.hash(&input.password)?;

        let now = self.clock.now();
        let customer = Customer::new(NewCustomer {
            id: CustomerId::new(),
            first_name: input.first_name,
            last_name: input.last_name,
            tax_id: input.tax_id,
            email: input.email,
            password_hash,
            address: input.address,
            income: input.income,
            now,
        });

        self.customer_repository.insert(&customer).await?;

        Ok(customer)
    }

    /// 顧客を取得する
    pub async fn get_customer(&self, id: &CustomerId) -> Result<Customer, AppError> {
        self.customer_repository
            .find_by_id(id)
            .await
            .or_not_found("顧客")
    }

    /// 顧客情報を部分更新する（氏名、収入、住所）
    pub async fn update_customer(&self, input: UpdateCustomerInput) -> Result<Customer, AppError> {
        let mut customer = self
            .customer_repository
            .find_by_id(&input.customer_id)
            .await
            .or_not_found("顧客")?;

        let now = self.clock.now();

        if input.first_name.is_some() || input.last_name.is_some() {
            let first_name = match input.first_name {
                Some(name) => name,
                None => customer.first_name().clone(),
            };
            let last_name = match input.last_name {
                Some(name) => name,
                None => customer.last_name().clone(),
            };
            customer = customer.with_name(first_name, last_name, now);
        }

        if let Some(income) = input.income {
            customer = customer.with_income(income, now);
        }

        if let Some(address) = input.address {
            customer = customer.with_address(address, now);
        }

        self.customer_repository.update(&customer).await?;

        Ok(customer)
    }

    /// 顧客を削除する
    pub async fn delete_customer(&self, id: &CustomerId) -> Result<(), AppError> {
        // 存在確認（存在しない ID の削除は NotFound）
        self.customer_repository
            .find_by_id(id)
            .await
            .or_not_found("顧客")?;

        self.customer_repository.delete(id).await?;

        Ok(())
    }
}
