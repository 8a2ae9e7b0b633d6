//! # ユースケース層
//!
//! Credit Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約

pub(crate) mod helpers;

pub mod credit;
pub mod customer;

pub use credit::{CreditUseCaseImpl, SaveCreditInput};
pub use customer::{CreateCustomerInput, CustomerUseCaseImpl, UpdateCustomerInput};
