//! # 顧客
//!
//! 顧客エンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`Customer`] | 顧客 | 登録時に作成され、複数のクレジットから参照される |
//! | [`TaxId`] | 税務 ID | 国の納税者番号。システム全体で一意 |
//! | [`Email`] | メールアドレス | システム全体で一意 |
//! | [`Address`] | 住所 | 顧客に埋め込まれる値オブジェクト |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: CustomerId は UUID をラップし、型安全性を確保
//! - **不変性**: エンティティフィールドは基本的に不変、変更はメソッド経由
//! - **バリデーション**: 値オブジェクトの生成時に検証ロジックを実行
//! - **PII 保護**: 氏名・税務 ID の Debug 出力はマスクされる

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, password::PasswordHash, value_objects::Income};

define_uuid_id! {
    /// 顧客 ID（一意識別子）
    ///
    /// UUID v7 を使用し、生成順にソート可能。
    /// Newtype パターンで型安全性を確保。
    pub struct CustomerId;
}

/// 税務 ID（値オブジェクト）
///
/// 国の納税者番号を表現する。固定フォーマット（数字 11 桁）で、
/// システム全体で一意。
///
/// # セキュリティ
///
/// PII（個人識別情報）のため、Debug 出力はマスクされる。
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxId(String);

impl std::fmt::Debug for TaxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TaxId").field(&"[REDACTED]").finish()
    }
}

impl TaxId {
    /// 税務 ID を作成する
    ///
    /// # バリデーション
    ///
    /// - ちょうど 11 桁であること
    /// - ASCII 数字のみで構成されること
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.len() != 11 || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::Validation(
                "税務 ID は数字 11 桁である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// メールアドレス（値オブジェクト）
///
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式であること
    /// - 最大 255 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.len() > 255 {
            return Err(DomainError::Validation(
                "メールアドレスは255文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

define_validated_string! {
    /// 名（値オブジェクト）
    ///
    /// PII のため、Debug 出力はマスクされる。
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 100 文字
    pub struct FirstName {
        label: "名",
        max_length: 100,
        pii: true,
    }
}

define_validated_string! {
    /// 姓（値オブジェクト）
    ///
    /// PII のため、Debug 出力はマスクされる。
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 100 文字
    pub struct LastName {
        label: "姓",
        max_length: 100,
        pii: true,
    }
}

define_validated_string! {
    /// 郵便番号（値オブジェクト）
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 20 文字
    pub struct ZipCode {
        label: "郵便番号",
        max_length: 20,
    }
}

define_validated_string! {
    /// 番地・通り名（値オブジェクト）
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 200 文字
    pub struct Street {
        label: "番地",
        max_length: 200,
    }
}

/// 住所（値オブジェクト）
///
/// 顧客に埋め込まれる。独立した識別子は持たない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    zip_code: ZipCode,
    street:   Street,
}

impl Address {
    /// 住所を作成する
    pub fn new(zip_code: ZipCode, street: Street) -> Self {
        Self { zip_code, street }
    }

    pub fn zip_code(&self) -> &ZipCode {
        &self.zip_code
    }

    pub fn street(&self) -> &Street {
        &self.street
    }
}

/// 顧客作成時のパラメータ
///
/// [`Customer::new`] の引数。フィールド数が多いため
/// 構造体にまとめ、呼び出し側での取り違えを防ぐ。
pub struct NewCustomer {
    pub id:            CustomerId,
    pub first_name:    FirstName,
    pub last_name:     LastName,
    pub tax_id:        TaxId,
    pub email:         Email,
    pub password_hash: PasswordHash,
    pub address:       Address,
    pub income:        Income,
    pub now:           DateTime<Utc>,
}

/// 顧客エンティティ
///
/// クレジット申請の主体となる顧客を表現する。
/// 登録時に作成され、複数のクレジットから多対一で参照される。
///
/// # 不変条件
///
/// - `tax_id` はシステム全体で一意
/// - `email` はシステム全体で一意
/// - `income` は 0 以上（`Income` で保証）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id:            CustomerId,
    first_name:    FirstName,
    last_name:     LastName,
    tax_id:        TaxId,
    email:         Email,
    password_hash: PasswordHash,
    address:       Address,
    income:        Income,
    created_at:    DateTime<Utc>,
    updated_at:    DateTime<Utc>,
}

impl Customer {
    /// 新しい顧客を作成する
    ///
    /// # 不変条件
    ///
    /// - `created_at` と `updated_at` は注入された現在時刻と一致する
    pub fn new(params: NewCustomer) -> Self {
        Self {
            id:            params.id,
            first_name:    params.first_name,
            last_name:     params.last_name,
            tax_id:        params.tax_id,
            email:         params.email,
            password_hash: params.password_hash,
            address:       params.address,
            income:        params.income,
            created_at:    params.now,
            updated_at:    params.now,
        }
    }

    /// 既存のデータから顧客を復元する（データベースから取得時）
    #[allow(clippy::too_many_arguments)]
    pub fn from_db(
        id: CustomerId,
        first_name: FirstName,
        last_name: LastName,
        tax_id: TaxId,
        email: Email,
        password_hash: PasswordHash,
        address: Address,
        income: Income,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            tax_id,
            email,
            password_hash,
            address,
            income,
            created_at,
            updated_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &CustomerId {
        &self.id
    }

    pub fn first_name(&self) -> &FirstName {
        &self.first_name
    }

    pub fn last_name(&self) -> &LastName {
        &self.last_name
    }

    pub fn tax_id(&self) -> &TaxId {
        &self.tax_id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn income(&self) -> Income {
        self.income
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // 更新メソッド

    /// 氏名を変更した新しいインスタンスを返す
    pub fn with_name(self, first_name: FirstName, last_name: LastName, now: DateTime<Utc>) -> Self {
        Self {
            first_name,
            last_name,
            updated_at: now,
            ..self
        }
    }

    /// 収入を変更した新しいインスタンスを返す
    pub fn with_income(self, income: Income, now: DateTime<Utc>) -> Self {
        Self {
            income,
            updated_at: now,
            ..self
        }
    }

    /// 住所を変更した新しいインスタンスを返す
    pub fn with_address(self, address: Address, now: DateTime<Utc>) -> Self {
        Self {
            address,
            updated_at: now,
            ..self
        }
    }
}
