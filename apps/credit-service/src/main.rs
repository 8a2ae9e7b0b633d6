//! # Credit Service サーバー
//!
//! 顧客とクレジット申請を管理する HTTP サービス。
//!
//! ## 役割
//!
//! - **顧客管理**: 登録・取得・更新・削除
//! - **クレジット申請**: 保存・顧客単位の一覧・クレジットコード照会
//! - **データ永続化**: PostgreSQL へのエンティティ保存
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CREDIT_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CREDIT_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `LOG_FORMAT` | No | ログ出力形式（`json` / `pretty`、デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p creditflow-credit-service
//!
//! # 本番環境
//! CREDIT_PORT=3001 DATABASE_URL=postgres://... \
//!   LOG_FORMAT=json cargo run -p creditflow-credit-service --release
//! ```

mod config;
mod error;
mod handler;
mod usecase;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use config::CreditServiceConfig;
use creditflow_domain::clock::SystemClock;
use creditflow_infra::{
    db,
    password::Argon2PasswordHasher,
    repository::{PostgresCreditRepository, PostgresCustomerRepository},
};
use creditflow_shared::observability::{TracingConfig, init_tracing};
use handler::{
    CreditState,
    CustomerState,
    create_customer,
    delete_customer,
    find_credit_by_code,
    get_customer,
    health_check,
    list_credits,
    save_credit,
    update_customer,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use usecase::{CreditUseCaseImpl, CustomerUseCaseImpl};

/// Credit Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(TracingConfig::from_env("credit-service"));

    // 設定読み込み
    let config = CreditServiceConfig::from_env();

    tracing::info!(
        "Credit Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成し、マイグレーションを適用
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションの適用に失敗しました");
    tracing::info!("データベースに接続しました");

    // 依存コンポーネントを初期化
    let customer_repository = Arc::new(PostgresCustomerRepository::new(pool.clone()));
    let credit_repository = Arc::new(PostgresCreditRepository::new(pool.clone()));
    let password_hasher = Arc::new(Argon2PasswordHasher::new());
    let clock = Arc::new(SystemClock);

    let customer_usecase = CustomerUseCaseImpl::new(
        customer_repository.clone(),
        password_hasher,
        clock.clone(),
    );
    let customer_state = Arc::new(CustomerState {
        usecase: customer_usecase,
    });

    let credit_usecase =
        CreditUseCaseImpl::new(credit_repository, customer_repository, clock);
    let credit_state = Arc::new(CreditState {
        usecase: credit_usecase,
    });

    // ルーター構築
    let app = Router::new()
        .route("/health", get(health_check))
        // 顧客 API
        .route("/api/customers", post(create_customer))
        .route(
            "/api/customers/{customer_id}",
            get(get_customer)
                .patch(update_customer)
                .delete(delete_customer),
        )
        .with_state(customer_state)
        // クレジット API
        .route("/api/credits", post(save_credit).get(list_credits))
        .route("/api/credits/{credit_code}", get(find_credit_by_code))
        .with_state(credit_state)
        .layer(TraceLayer::new_for_http());

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Credit Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
