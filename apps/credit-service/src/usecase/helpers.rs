//! ユースケース層の共通ヘルパー
//!
//! リポジトリ呼び出し結果の変換など、
//! 複数のユースケースで繰り返されるパターンを共通化する。

use creditflow_infra::InfraError;

use crate::error::AppError;

/// リポジトリの `Result<Option<T>, InfraError>` を `Result<T, AppError>` に変換する
///
/// `find_by_id` 等の `Option` を返すリポジトリメソッドの結果を、
/// `AppError::NotFound` または `AppError::Internal` に変換する。
///
/// ```ignore
/// // Before
/// let customer = self.customer_repository.find_by_id(&id).await
///     .map_err(|e| AppError::Internal(format!("顧客の取得に失敗: {}", e)))?
///     .ok_or_else(|| AppError::NotFound("顧客が見つかりません".to_string()))?;
///
/// // After
/// let customer = self.customer_repository.find_by_id(&id).await
///     .or_not_found("顧客")?;
/// ```
pub(crate) trait FindResultExt<T> {
    /// `None` の場合は `AppError::NotFound`、`InfraError` の場合は `AppError::Internal` を返す
    fn or_not_found(self, entity_name: &str) -> Result<T, AppError>;
}

impl<T> FindResultExt<T> for Result<Option<T>, InfraError> {
    fn or_not_found(self, entity_name: &str) -> Result<T, AppError> {
        self.map_err(|e| AppError::Internal(format!("{}の取得に失敗: {}", entity_name, e)))?
            .ok_or_else(|| AppError::NotFound(format!("{}が見つかりません", entity_name)))
    }
}

#[cfg(test)]
mod tests {
    use creditflow_infra::InfraError;

    use super::*;

    #[test]
    fn test_or_not_found_ok_some_は値を返す() {
        let result: Result<Option<i32>, InfraError> = Ok(Some(42));

        let value = result.or_not_found("テスト").unwrap();

        assert_eq!(value, 42);
    }

    #[test]
    fn test_or_not_found_ok_none_はnotfoundエラーを返す() {
        let result: Result<Option<i32>, InfraError> = Ok(None);

        let err = result.or_not_found("顧客").unwrap_err();

        match err {
            AppError::NotFound(msg) => {
                assert_eq!(msg, "顧客が見つかりません");
            }
            other => panic!("NotFound を期待したが {:?} を受信", other),
        }
    }

    #[test]
    fn test_or_not_found_errはinternalエラーを返す() {
        let result: Result<Option<i32>, InfraError> = Err(InfraError::unexpected("接続失敗"));

        let err = result.or_not_found("クレジット").unwrap_err();

        match err {
            AppError::Internal(msg) => {
                assert!(msg.contains("クレジットの取得に失敗"));
                assert!(msg.contains("接続失敗"));
            }
            other => panic!("Internal を期待したが {:?} を受信", other),
        }
    }
}
