// region:    --- Imports
use job_bidding::api::HttpMarketplaceApi;
use job_bidding::config::Config;
use job_bidding::handlers;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // 설정 로드
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{:<12} --> 설정 로드 실패: {}", "Main", e);
            return Err(e.into());
        }
    };
    info!("{:<12} --> API 주소: {}", "Main", config.api_base_url);

    // 마켓플레이스 API 클라이언트 생성
    let api = Arc::new(HttpMarketplaceApi::from_config(&config)?);

    // 프론트엔드 개발 서버를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes_all = handlers::router(api).layer(cors);

    let listener = TcpListener::bind(&config.listen_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
