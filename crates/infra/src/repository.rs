//! # リポジトリ実装
//!
//! 永続化境界のトレイトとその具体的な実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: トレイトをここで定義し、ユースケース層は
//!   `Arc<dyn Trait>` 経由で利用する
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod credit_repository;
pub mod customer_repository;

pub use credit_repository::{CreditRepository, PostgresCreditRepository};
pub use customer_repository::{CustomerRepository, PostgresCustomerRepository};
