//! # 共通値オブジェクト
//!
//! 金額・回数など、複数のコンテキストで共有される値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: プリミティブ型をラップし、型安全性を確保
//! - **バリデーション**: 生成時に検証し、不正な値の存在を型レベルで排除
//! - **不変性**: 一度作成したら変更不可
//!
//! ## 含まれる型
//!
//! | 型 | ラップ対象 | 用途 |
//! |---|-----------|------|
//! | [`Income`] | `Decimal` | 顧客の収入（非負） |
//! | [`CreditValue`] | `Decimal` | 与信額（正の金額） |
//! | [`InstallmentCount`] | `i32` | 分割払い回数（1〜48） |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// 分割払い回数の上限
pub const MAX_INSTALLMENTS: i32 = 48;

// =========================================================================
// Income（収入）
// =========================================================================

/// 顧客の収入（値オブジェクト）
///
/// 月収を十進数で表現する。浮動小数点の丸め誤差を避けるため
/// `rust_decimal::Decimal` を使用する。
///
/// # 不変条件
///
/// - 0 以上（負の収入は存在しない）
///
/// # 使用例
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use creditflow_domain::value_objects::Income;
/// use rust_decimal::Decimal;
///
/// let income = Income::new(Decimal::new(1000_00, 2))?;
/// assert_eq!(income.as_decimal().to_string(), "1000.00");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Income(Decimal);

impl Income {
    /// 指定した値から収入を作成する
    ///
    /// # エラー
    ///
    /// 負の値の場合は `DomainError::Validation` を返す。
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value.is_sign_negative() {
            return Err(DomainError::Validation(
                "収入は 0 以上である必要があります".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// 内部の Decimal 値を取得する
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for Income {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// CreditValue（与信額）
// =========================================================================

/// 与信額（値オブジェクト）
///
/// 申請されたクレジットの金額を表現する。
///
/// # 不変条件
///
/// - 0 より大きい（ゼロ与信・負の与信は無効）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreditValue(Decimal);

impl CreditValue {
    /// 指定した値から与信額を作成する
    ///
    /// # エラー
    ///
    /// 0 以下の値の場合は `DomainError::Validation` を返す。
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "与信額は 0 より大きい必要があります".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// 内部の Decimal 値を取得する
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for CreditValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// InstallmentCount（分割払い回数）
// =========================================================================

/// 分割払い回数（値オブジェクト）
///
/// クレジットの支払い回数を表現する。
///
/// # 不変条件
///
/// - 1 以上 [`MAX_INSTALLMENTS`]（48）以下
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstallmentCount(i32);

impl InstallmentCount {
    /// 指定した値から分割払い回数を作成する
    ///
    /// # エラー
    ///
    /// 1〜48 の範囲外の場合は `DomainError::Validation` を返す。
    pub fn new(value: i32) -> Result<Self, DomainError> {
        if !(1..=MAX_INSTALLMENTS).contains(&value) {
            return Err(DomainError::Validation(format!(
                "分割払い回数は 1 以上 {} 以下である必要があります",
                MAX_INSTALLMENTS
            )));
        }
        Ok(Self(value))
    }

    /// 内部の i32 値を取得する
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for InstallmentCount {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for InstallmentCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// テスト
// =========================================================================
