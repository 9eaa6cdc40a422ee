use actix_web::{web, App, HttpServer};
use ladder_backend::config::app::AppConfig;
use ladder_backend::config::db::DbProfile;
use ladder_backend::infra::state::build_state;
use ladder_backend::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use ladder_backend::routes;
use ladder_backend::services::lifecycle::spawn_sweep_loop;
use ladder_backend::state::security_config::SecurityConfig;
use ladder_backend::telemetry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment is provided by the runtime (compose env_file, or a sourced .env locally)
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db(DbProfile::Prod)
        .with_security(SecurityConfig::new(config.jwt_secret.as_bytes()))
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    let _sweep = spawn_sweep_loop(app_state.clone(), config.sweep_interval);
    info!(
        host = %config.host,
        port = config.port,
        sweep_interval_secs = config.sweep_interval.as_secs(),
        "ladder backend starting"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
