use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::{init_logging_default, init_logging_json};
use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use service::movie::repo::seaorm::SeaOrmCatalog;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => init_logging_default(),
        LogFormat::Json => init_logging_json(),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Host/port from configs, else `SERVER_HOST`/`SERVER_PORT`, else 127.0.0.1:8080
fn load_bind_addr(cfg: Option<&AppConfig>) -> Result<SocketAddr, StartupError> {
    let (host, port) = match cfg {
        Some(cfg) => (cfg.server.host.clone(), cfg.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    format!("{}:{}", host, port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{}: {}", host, port, e)))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = AppConfig::load_and_validate();
    init_logging(cfg.as_ref().map(|c| c.logging.format).unwrap_or_default());
    if let Err(e) = &cfg {
        warn!(error = %e, "config.toml not usable, using environment defaults");
    }

    let db = models::db::connect().await?;
    models::db::test_connection(&db).await?;
    let store = Arc::new(SeaOrmCatalog::new(db));
    let state = AppState::new(store);

    let app: Router = routes::build_router(state, build_cors());

    let addr = load_bind_addr(cfg.as_ref().ok())?;
    info!(%addr, "starting movie catalog");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "0.0.0.0".into();
        cfg.server.port = 9090;
        let addr = load_bind_addr(Some(&cfg)).unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:9090");
    }

    #[test]
    fn unparsable_host_is_invalid_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(matches!(load_bind_addr(Some(&cfg)), Err(StartupError::InvalidConfig(_))));
    }
}
