//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケースに委譲

pub mod credit;
pub mod customer;
pub mod health;

pub use credit::{CreditState, find_credit_by_code, list_credits, save_credit};
pub use customer::{
    CustomerState,
    create_customer,
    delete_customer,
    get_customer,
    update_customer,
};
pub use health::health_check;
