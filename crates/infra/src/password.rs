//! # パスワードハッシュ化
//!
//! Argon2id によるパスワードハッシュ化を提供する。
//! 顧客登録時に平文パスワードをハッシュ化し、ハッシュのみを永続化する。

use argon2::{
    Argon2,
    Params,
    PasswordHasher as _,
    password_hash::{SaltString, rand_core::OsRng},
};
use creditflow_domain::password::{PasswordHash, PlainPassword};

use crate::InfraError;

/// パスワードハッシュ化を担当するトレイト
///
/// ユースケース層から注入され、テストではハッシュ化を省略した
/// モックに差し替え可能。
pub trait PasswordHasher: Send + Sync {
    /// 平文パスワードをハッシュ化する
    ///
    /// # Errors
    ///
    /// ハッシュ計算に失敗した場合
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError>;
}

/// Argon2id によるパスワードハッシュ化の実装
///
/// OWASP 推奨パラメータ（RFC 9106）を使用:
/// - Memory: 64 MB
/// - Iterations: 1
/// - Parallelism: 1
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        let params = Params::new(
            65536, // memory (KB) = 64 MB
            1,     // iterations
            1,     // parallelism
            None,  // output length (default: 32)
        )
        .expect("Argon2 パラメータが不正です");

        Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_str().as_bytes(), &salt)
            .map_err(|e| InfraError::unexpected(format!("ハッシュ計算に失敗: {e}")))?;

        Ok(PasswordHash::new(hash.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ハッシュはargon2id形式で出力される() {
        let hasher = Argon2PasswordHasher::new();
        let password = PlainPassword::new("password123").unwrap();

        let hash = hasher.hash(&password).unwrap();

        assert!(hash.as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn test_同じパスワードでもソルトにより異なるハッシュになる() {
        let hasher = Argon2PasswordHasher::new();
        let password = PlainPassword::new("password123").unwrap();

        let first = hasher.hash(&password).unwrap();
        let second = hasher.hash(&password).unwrap();

        assert_ne!(first, second);
    }
}
