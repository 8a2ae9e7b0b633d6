//! # Credit Service 設定
//!
//! 環境変数から Credit Service サーバーの設定を読み込む。

use std::env;

/// Credit Service サーバーの設定
#[derive(Debug, Clone)]
pub struct CreditServiceConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続 URL
    pub database_url: String,
}

impl CreditServiceConfig {
    /// 環境変数から設定を読み込む
    ///
    /// 必須の環境変数が未設定の場合は起動時に panic する。
    pub fn from_env() -> Self {
        Self {
            host: env::var("CREDIT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("CREDIT_PORT")
                .expect("CREDIT_PORT が設定されていません")
                .parse()
                .expect("CREDIT_PORT は有効なポート番号である必要があります"),
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL が設定されていません"),
        }
    }
}
