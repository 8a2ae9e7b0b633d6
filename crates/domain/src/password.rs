//! # パスワード
//!
//! パスワード関連の値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`PlainPassword`] | 平文パスワード | 顧客登録時の入力値 |
//! | [`PasswordHash`] | パスワードハッシュ | 永続化用のハッシュ値 |
//!
//! ハッシュ化そのもの（Argon2id）はインフラ層の責務であり、
//! ドメイン層は値の器だけを提供する。

use crate::DomainError;

/// 平文パスワード（顧客登録時の入力値）
///
/// 顧客が入力したパスワードをラップする。永続化されることはない。
///
/// # セキュリティ
///
/// Debug 出力ではパスワードの値をマスクする。
#[derive(Clone)]
pub struct PlainPassword(String);

impl std::fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
    }
}

impl PlainPassword {
    /// パスワードを作成する
    ///
    /// # バリデーション
    ///
    /// - 6 文字以上であること
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.chars().count() < 6 {
            return Err(DomainError::Validation(
                "パスワードは 6 文字以上である必要があります".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// パスワードハッシュ（永続化用）
///
/// Argon2id でハッシュ化されたパスワード文字列をラップする。
/// データベースに保存される形式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// ハッシュ文字列からインスタンスを作成する
    ///
    /// 主にデータベースからの復元時に使用する。
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_平文パスワードは6文字以上を受け入れる() {
        assert!(PlainPassword::new("123456").is_ok());
    }

    #[test]
    fn test_平文パスワードは6文字未満を拒否する() {
        assert!(PlainPassword::new("12345").is_err());
    }

    #[test]
    fn test_平文パスワードのdebug出力はマスクされる() {
        let password = PlainPassword::new("secret-password").unwrap();
        let debug = format!("{:?}", password);

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-password"));
    }

    #[test]
    fn test_パスワードハッシュは値を保持する() {
        let hash = PasswordHash::new("$argon2id$...");
        assert_eq!(hash.as_str(), "$argon2id$...");
    }
}
