//! # Todo API サーバー
//!
//! Todo の CRUD とヘルスチェックを提供する HTTP サービス。
//!
//! ## 役割
//!
//! - **リクエスト検証**: 操作ごとの許可フィールド集合チェック（ドメイン層）
//! - **フィルタリング**: 完全一致フィルタ + window（相対期限）条件
//! - **データ永続化**: PostgreSQL への Todo 保存
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//!
//! ## 起動方法
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p todo-api
//! ```

mod config;

use std::{net::SocketAddr, sync::Arc};

use config::ApiConfig;
use todo_api::{
   app::build_app,
   handler::TodoState,
   usecase::TodoUseCaseImpl,
};
use todo_domain::clock::SystemClock;
use todo_infra::{db, repository::PostgresTodoRepository};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Todo API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   tracing_subscriber::registry()
      .with(
         tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,todo=debug".into()),
      )
      .with(tracing_subscriber::fmt::layer())
      .init();

   // 設定読み込み
   let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");

   tracing::info!(
      "Todo API サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   // データベース接続プールを作成
   let pool = db::create_pool(&config.database_url)
      .await
      .expect("データベース接続に失敗しました");
   tracing::info!("データベースに接続しました");

   // マイグレーション適用
   db::run_migrations(&pool)
      .await
      .expect("マイグレーションの適用に失敗しました");

   // 依存コンポーネントを初期化
   let repository = PostgresTodoRepository::new(pool);
   let usecase = TodoUseCaseImpl::new(repository, SystemClock);
   let state = Arc::new(TodoState { usecase });

   // ルーター構築
   let app = build_app(state);

   // サーバー起動
   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .expect("アドレスのパースに失敗しました");

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("Todo API サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
