use axum::{routing::get, Router};
use invoice_final_rust::{api, create_pool, AggregationService, AppConfig, PgLookup};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env();
    info!("Starting server with config: {:?}", config);

    // 创建数据库连接池
    let pool = create_pool(&config.database.url).await?;
    info!("Database pool created");

    // 聚合服务 (Postgres 查询端口)
    let service = Arc::new(AggregationService::new(PgLookup::new(pool)));

    // 构建路由
    let app = Router::new()
        .route("/health", get(api::health_check))
        .route("/api/final/:invoice_number", get(api::aggregate_final))
        .route(
            "/api/final/:invoice_number/csv",
            get(api::export_final_csv),
        )
        .with_state(service)
        .layer(ServiceBuilder::new());

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET /api/final/:invoice_number      - Invoice Final aggregation");
    info!("  GET /api/final/:invoice_number/csv  - CSV export");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
