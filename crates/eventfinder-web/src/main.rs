#![allow(non_snake_case)]

#[cfg(feature = "ssr")]
mod config {
    use serde::Deserialize;

    pub const DEFAULT_PATH: &str = "config.example.toml";

    #[derive(Deserialize, Clone, Debug, Default)]
    #[serde(default)]
    pub struct Config {
        pub server: ServerConfig,
        pub api: ApiConfig,
    }

    /// Overrides the Leptos `site-addr` when present.
    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct ServerConfig {
        pub bind: String,
        pub port: u16,
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct ApiConfig {
        /// Origin of the REST backend; `/api/...` paths are appended as-is.
        pub upstream: String,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                bind: "127.0.0.1".into(),
                port: 3000,
            }
        }
    }

    impl Default for ApiConfig {
        fn default() -> Self {
            Self {
                upstream: "http://127.0.0.1:8000".into(),
            }
        }
    }

    pub fn load(path: &str) -> Config {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("failed to parse config {path}: {e}, using defaults");
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read config {path}: {e}, using defaults");
                Config::default()
            }
        }
    }

    /// Value of `--config <path>`, or the example config next to the binary.
    pub fn path_from_args(args: &[String]) -> String {
        args.iter()
            .position(|a| a == "--config")
            .and_then(|idx| args.get(idx + 1))
            .cloned()
            .unwrap_or_else(|| DEFAULT_PATH.into())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::io::Write;

        #[test]
        fn reads_partial_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "[api]\nupstream = \"http://backend:8000\"").unwrap();

            let config = load(file.path().to_str().unwrap());
            assert_eq!(config.api.upstream, "http://backend:8000");
            assert_eq!(config.server.port, 3000);
        }

        #[test]
        fn falls_back_on_missing_or_invalid_file() {
            let config = load("/nonexistent/eventfinder.toml");
            assert_eq!(config.api.upstream, "http://127.0.0.1:8000");

            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "[server\nport = ").unwrap();
            let config = load(file.path().to_str().unwrap());
            assert_eq!(config.server.bind, "127.0.0.1");
        }

        #[test]
        fn picks_config_flag() {
            let args: Vec<String> = ["eventfinder-web", "--config", "prod.toml"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            assert_eq!(path_from_args(&args), "prod.toml");
            assert_eq!(path_from_args(&args[..2]), DEFAULT_PATH);
            assert_eq!(path_from_args(&[]), DEFAULT_PATH);
        }
    }
}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use axum::Router;
    use eventfinder_api::AppState;
    use eventfinder_ui::{shell, App};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let configPath = config::path_from_args(&args);
    let appConfig = config::load(&configPath);
    tracing::info!(
        "loaded config from {configPath}: bind={}:{} upstream={}",
        appConfig.server.bind,
        appConfig.server.port,
        appConfig.api.upstream
    );

    let conf = get_configuration(None)?;
    let mut leptosOptions = conf.leptos_options;
    let addr: SocketAddr = format!("{}:{}", appConfig.server.bind, appConfig.server.port).parse()?;
    leptosOptions.site_addr = addr;

    let routes = generate_route_list(App);

    // `/api/*` goes to the REST backend; everything else is the app.
    let apiRouter = eventfinder_api::api_router(AppState::new(appConfig.api.upstream.clone())?);

    let app = Router::new()
        .leptos_routes(&leptosOptions, routes, {
            let leptosOptions = leptosOptions.clone();
            move || shell(leptosOptions.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptosOptions)
        .merge(apiRouter)
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {}
