use crate::cli::ServeArgs;
use crate::infra::{
    scorer_from_config, AppState, InMemoryBuyerRepository, InMemoryDealRepository,
};
use crate::routes::with_deal_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use wholesale_ai::config::AppConfig;
use wholesale_ai::error::AppError;
use wholesale_ai::telemetry;
use wholesale_ai::workflows::deals::buyers::BuyerService;
use wholesale_ai::workflows::deals::portfolio::DealService;
use wholesale_ai::workflows::deals::{HttpAnalysisGateway, ResultResolver};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let gateway = HttpAnalysisGateway::new(&config.analysis)?;
    if !gateway.is_configured() {
        info!("no remote analysis endpoint configured, deal analysis will be scored locally");
    }
    let scorer = scorer_from_config(&config.analysis);
    let resolver = Arc::new(ResultResolver::new(
        Arc::new(gateway),
        scorer.clone(),
        config.analysis.timeout,
    ));
    let deal_service = Arc::new(DealService::new(
        Arc::new(InMemoryDealRepository::default()),
        scorer,
    ));

    let buyer_service = Arc::new(BuyerService::new(Arc::new(
        InMemoryBuyerRepository::default(),
    )));

    let app = with_deal_routes(resolver, deal_service, buyer_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "wholesale deal service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
