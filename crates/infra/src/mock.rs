//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! creditflow-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! クレジットモックは `insert` と `find_by_credit_code` の呼び出し回数を
//! 記録する。ユースケーステストで「ストアへの保存はちょうど 1 回」という
//! 性質を検証するために使用する。

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use creditflow_domain::{
    credit::{Credit, CreditCode},
    customer::{Customer, CustomerId, Email, TaxId},
};

use crate::{
    error::InfraError,
    password::PasswordHasher,
    repository::{CreditRepository, CustomerRepository},
};

// ===== MockCustomerRepository =====

#[derive(Clone, Default)]
pub struct MockCustomerRepository {
    customers: Arc<Mutex<Vec<Customer>>>,
}

impl MockCustomerRepository {
    pub fn new() -> Self {
        Self {
            customers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// テストの準備用に顧客を直接追加する
    pub fn add_customer(&self, customer: Customer) {
        self.customers.lock().unwrap().push(customer);
    }
}

#[async_trait]
impl CustomerRepository for MockCustomerRepository {
    async fn insert(&self, customer: &Customer) -> Result<(), InfraError> {
        let mut customers = self.customers.lock().unwrap();
        customers.push(customer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, InfraError> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Customer>, InfraError> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.email() == email)
            .cloned())
    }

    async fn find_by_tax_id(&self, tax_id: &TaxId) -> Result<Option<Customer>, InfraError> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.tax_id() == tax_id)
            .cloned())
    }

    async fn update(&self, customer: &Customer) -> Result<(), InfraError> {
        let mut customers = self.customers.lock().unwrap();
        if let Some(pos) = customers.iter().position(|c| c.id() == customer.id()) {
            customers[pos] = customer.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &CustomerId) -> Result<(), InfraError> {
        self.customers.lock().unwrap().retain(|c| c.id() != id);
        Ok(())
    }
}

// ===== MockCreditRepository =====

#[derive(Clone, Default)]
pub struct MockCreditRepository {
    credits:            Arc<Mutex<Vec<Credit>>>,
    insert_calls:       Arc<AtomicUsize>,
    find_by_code_calls: Arc<AtomicUsize>,
}

impl MockCreditRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// テストの準備用にクレジットを直接追加する（呼び出し回数に数えない）
    pub fn add_credit(&self, credit: Credit) {
        self.credits.lock().unwrap().push(credit);
    }

    /// `insert` が呼ばれた回数を返す
    pub fn insert_call_count(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// `find_by_credit_code` が呼ばれた回数を返す
    pub fn find_by_code_call_count(&self) -> usize {
        self.find_by_code_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CreditRepository for MockCreditRepository {
    async fn insert(&self, credit: &Credit) -> Result<(), InfraError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        let mut credits = self.credits.lock().unwrap();
        credits.push(credit.clone());
        Ok(())
    }

    async fn find_all_by_customer_id(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<Credit>, InfraError> {
        Ok(self
            .credits
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.customer_id() == customer_id)
            .cloned()
            .collect())
    }

    async fn find_by_credit_code(&self, code: &CreditCode) -> Result<Option<Credit>, InfraError> {
        self.find_by_code_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .credits
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.credit_code() == code)
            .cloned())
    }
}

// ===== MockPasswordHasher =====

/// ハッシュ計算を省略するテスト用ハッシャー
///
/// Argon2id は意図的に低速なため、ユースケーステストでは
/// 平文にプレフィックスを付けただけの疑似ハッシュに差し替える。
pub struct MockPasswordHasher;

impl PasswordHasher for MockPasswordHasher {
    fn hash(
        &self,
        password: &creditflow_domain::password::PlainPassword,
    ) -> Result<creditflow_domain::password::PasswordHash, InfraError> {
        Ok(creditflow_domain::password::PasswordHash::new(format!(
            "hashed:{}",
            password.as_str()
        )))
    }
}
