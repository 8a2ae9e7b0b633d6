//! # クレジット（与信）
//!
//! クレジットエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`Credit`] | クレジット | 顧客が申請した与信。作成後は読み取り専用 |
//! | [`CreditCode`] | クレジットコード | 外部照会用の一意トークン。生成後は不変 |
//! | [`CreditStatus`] | 審査ステータス | 申請直後は `InProgress` |
//!
//! ## 設計方針
//!
//! - **クレジットコードの不変性**: `Credit::new` の内部で生成され、
//!   以降変更する手段を提供しない
//! - **所有者の必須性**: クレジットは必ずちょうど 1 人の顧客に属する

use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use uuid::Uuid;

use crate::{
    DomainError,
    customer::CustomerId,
    value_objects::{CreditValue, InstallmentCount},
};

define_uuid_id! {
    /// クレジット ID（内部用一意識別子）
    ///
    /// UUID v7 を使用し、生成順にソート可能。
    /// 外部照会には [`CreditCode`] を使用する。
    pub struct CreditId;
}

/// クレジットコード（値オブジェクト）
///
/// 128 ビットのランダムトークン（UUID v4）。クレジット作成時に一度だけ
/// 生成され、以降は不変。全クレジットを通して一意であり、
/// 外部からの照会キーとして使用する。
///
/// [`CreditId`]（UUID v7、時系列）とは異なり、推測困難性を優先して
/// ランダムな UUID v4 を採用する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct CreditCode(Uuid);

impl CreditCode {
    /// 新しいクレジットコードを生成する（UUID v4）
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 既存の UUID からクレジットコードを作成する
    ///
    /// 主にデータベースからの復元時に使用する。
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部の UUID 参照を取得する
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CreditCode {
    fn default() -> Self {
        Self::new()
    }
}

/// クレジットの審査ステータス
///
/// 申請直後は `InProgress`。承認/却下の遷移は審査プロセス側の責務であり、
/// このコアの範囲では作成後の状態変更は行わない。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CreditStatus {
    /// 審査中
    InProgress,
    /// 承認済み
    Approved,
    /// 却下
    Rejected,
}

impl std::str::FromStr for CreditStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::Validation(format!(
                "不正な審査ステータス: {}",
                s
            ))),
        }
    }
}

/// クレジット作成時のパラメータ
///
/// [`Credit::new`] の引数。クレジットコードとステータスは
/// 含まれない（内部で生成・初期化される）。
pub struct NewCredit {
    pub id:                     CreditId,
    pub credit_value:           CreditValue,
    pub day_first_installment:  NaiveDate,
    pub number_of_installments: InstallmentCount,
    pub customer_id:            CustomerId,
    pub now:                    DateTime<Utc>,
}

/// クレジットエンティティ
///
/// 顧客が申請した与信を表現する。保存時に所有顧客の存在が検証され、
/// 一度永続化された後は読み取り専用。
///
/// # 不変条件
///
/// - `credit_code` は全クレジットを通して一意で、生成後は不変
/// - クレジットは必ずちょうど 1 人の顧客（`customer_id`）に属する
/// - `credit_value` は正の金額（`CreditValue` で保証）
/// - `number_of_installments` は 1〜48（`InstallmentCount` で保証）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credit {
    id:                     CreditId,
    credit_code:            CreditCode,
    credit_value:           CreditValue,
    day_first_installment:  NaiveDate,
    number_of_installments: InstallmentCount,
    status:                 CreditStatus,
    customer_id:            CustomerId,
    created_at:             DateTime<Utc>,
}

impl Credit {
    /// 新しいクレジットを作成する
    ///
    /// # 不変条件
    ///
    /// - クレジットコードはここで一度だけ生成される（UUID v4）
    /// - 作成時のステータスは `InProgress`
    pub fn new(params: NewCredit) -> Self {
        Self {
            id:                     params.id,
            credit_code:            CreditCode::new(),
            credit_value:           params.credit_value,
            day_first_installment:  params.day_first_installment,
            number_of_installments: params.number_of_installments,
            status:                 CreditStatus::InProgress,
            customer_id:            params.customer_id,
            created_at:             params.now,
        }
    }

    /// 既存のデータからクレジットを復元する（データベースから取得時）
    #[allow(clippy::too_many_arguments)]
    pub fn from_db(
        id: CreditId,
        credit_code: CreditCode,
        credit_value: CreditValue,
        day_first_installment: NaiveDate,
        number_of_installments: InstallmentCount,
        status: CreditStatus,
        customer_id: CustomerId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            credit_code,
            credit_value,
            day_first_installment,
            number_of_installments,
            status,
            customer_id,
            created_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &CreditId {
        &self.id
    }

    pub fn credit_code(&self) -> &CreditCode {
        &self.credit_code
    }

    pub fn credit_value(&self) -> CreditValue {
        self.credit_value
    }

    pub fn day_first_installment(&self) -> NaiveDate {
        self.day_first_installment
    }

    pub fn number_of_installments(&self) -> InstallmentCount {
        self.number_of_installments
    }

    pub fn status(&self) -> CreditStatus {
        self.status
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // ビジネスロジックメソッド

    /// 指定された顧客がこのクレジットの所有者か判定する
    pub fn is_owned_by(&self, customer_id: &CustomerId) -> bool {
        &self.customer_id == customer_id
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    use super::*;

    // フィクスチャ

    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn build_credit(customer_id: CustomerId, now: DateTime<Utc>) -> Credit {
        Credit::new(NewCredit {
            id: CreditId::new(),
            credit_value: CreditValue::new(Decimal::new(500_00, 2)).unwrap(),
            day_first_installment: NaiveDate::from_ymd_opt(2023, 6, 22).unwrap(),
            number_of_installments: InstallmentCount::new(5).unwrap(),
            customer_id,
            now,
        })
    }

    // CreditCode のテスト

    #[test]
    fn test_クレジットコードは毎回異なる値を生成する() {
        let first = CreditCode::new();
        let second = CreditCode::new();

        assert_ne!(first, second);
    }

    #[test]
    fn test_クレジットコードはuuidから復元できる() {
        let code = CreditCode::new();
        let restored = CreditCode::from_uuid(*code.as_uuid());

        assert_eq!(code, restored);
    }

    // CreditStatus のテスト

    #[rstest]
    #[case("in_progress", CreditStatus::InProgress)]
    #[case("approved", CreditStatus::Approved)]
    #[case("rejected", CreditStatus::Rejected)]
    fn test_審査ステータスの文字列パース(
        #[case] input: &str,
        #[case] expected: CreditStatus,
    ) {
        assert_eq!(input.parse::<CreditStatus>().unwrap(), expected);
    }

    #[test]
    fn test_審査ステータスの不正な文字列はエラー() {
        assert!("unknown".parse::<CreditStatus>().is_err());
    }

    #[test]
    fn test_審査ステータスのdb文字列() {
        let status_str: &str = CreditStatus::InProgress.into();
        assert_eq!(status_str, "in_progress");
    }

    // Credit のテスト

    #[rstest]
    fn test_新規クレジットは審査中ステータス(now: DateTime<Utc>) {
        let credit = build_credit(CustomerId::new(), now);

        assert_eq!(credit.status(), CreditStatus::InProgress);
    }

    #[rstest]
    fn test_新規クレジットのcreated_atは注入された値と一致する(
        now: DateTime<Utc>,
    ) {
        let credit = build_credit(CustomerId::new(), now);

        assert_eq!(credit.created_at(), now);
    }

    #[rstest]
    fn test_所有者判定_所有者は一致する(now: DateTime<Utc>) {
        let customer_id = CustomerId::new();
        let credit = build_credit(customer_id.clone(), now);

        assert!(credit.is_owned_by(&customer_id));
    }

    #[rstest]
    fn test_所有者判定_別の顧客は一致しない(now: DateTime<Utc>) {
        let credit = build_credit(CustomerId::new(), now);

        assert!(!credit.is_owned_by(&CustomerId::new()));
    }

    #[rstest]
    fn test_from_dbはすべてのフィールドを復元する(now: DateTime<Utc>) {
        let original = build_credit(CustomerId::new(), now);

        let restored = Credit::from_db(
            original.id().clone(),
            original.credit_code().clone(),
            original.credit_value(),
            original.day_first_installment(),
            original.number_of_installments(),
            original.status(),
            original.customer_id().clone(),
            original.created_at(),
        );

        assert_eq!(restored, original);
    }
}
