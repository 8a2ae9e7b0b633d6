//! # CreditFlow ドメイン層
//!
//! 与信管理のビジネスロジックの中核を担うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートは DDD（ドメイン駆動設計）の原則に従い、以下を提供する:
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: Customer, Credit）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: TaxId,
//!   CreditValue）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! credit-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）には一切依存しない。
//! これにより、ビジネスロジックの純粋性が保たれる。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`customer`] - 顧客エンティティと関連の値オブジェクト
//! - [`credit`] - クレジット（与信）エンティティと関連の値オブジェクト
//! - [`clock`] - テスト可能な時刻プロバイダ
//!
//! ## 使用例
//!
//! ```rust
//! use creditflow_domain::{DomainError, credit::CreditCode};
//!
//! // クレジットコードの生成（128 ビットのランダムトークン）
//! let code = CreditCode::new();
//!
//! // ドメインエラーの生成
//! let error = DomainError::NotFound {
//!     entity_type: "Credit",
//!     id:          code.to_string(),
//! };
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod credit;
pub mod customer;
pub mod error;
pub mod password;
pub mod value_objects;

pub use error::DomainError;
