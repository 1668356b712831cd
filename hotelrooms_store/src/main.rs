use std::sync::Arc;

use actix_web::{App, HttpServer};
use opentelemetry::global;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::runtime::TokioCurrentThread;
use paperclip::actix::{web, OpenApiExt};
use tracing_actix_web::TracingLogger;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use hotelrooms_store::app_config::config_app;
use hotelrooms_store::clients_repository::{
    ClientsRepository, InMemoryClientsRepository, PostgresClientsRepository,
    PostgresClientsRepositoryConfig,
};
use hotelrooms_store::rooms_repository::{
    InMemoryRoomsRepository, PostgresRoomsRepository, PostgresRoomsRepositoryConfig,
    RoomsRepository,
};
use hotelrooms_store::settings::StoreSettings;

// Based on https://github.com/LukeMathWalker/tracing-actix-web/blob/main/examples/opentelemetry/src/main.rs#L15
fn init_telemetry() {
    let app_name = "hotelrooms_store";

    // Start a new Jaeger trace pipeline.
    // Spans are exported in batch - recommended setup for a production application.
    global::set_text_map_propagator(TraceContextPropagator::new());
    #[allow(deprecated)]
    let tracer = opentelemetry_jaeger::new_agent_pipeline()
        .with_service_name(app_name)
        .install_batch(TokioCurrentThread)
        .expect("Failed to install OpenTelemetry tracer.");

    // Filter based on level - trace, debug, info, warn, error
    // Tunable via `RUST_LOG` env variable
    let env_filter = EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("info"));
    let telemetry = tracing_opentelemetry::layer().with_tracer(tracer);
    let formatting_layer = BunyanFormattingLayer::new(app_name.into(), std::io::stdout);
    let subscriber = Registry::default()
        .with(env_filter)
        .with(telemetry)
        .with(JsonStorageLayer)
        .with(formatting_layer);
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to install `tracing` subscriber.")
}

async fn init_repositories(
    settings: &StoreSettings,
) -> anyhow::Result<(Arc<dyn RoomsRepository>, Arc<dyn ClientsRepository>)> {
    if settings.use_in_memory_db {
        tracing::info!("Using in-memory rooms and clients repositories");
        return Ok((
            Arc::new(InMemoryRoomsRepository::default()),
            Arc::new(InMemoryClientsRepository::default()),
        ));
    }

    let rooms = PostgresRoomsRepository::init(PostgresRoomsRepositoryConfig {
        hostname: settings.db_host.clone(),
        username: settings.db_username.clone(),
        password: settings.db_password.clone(),
    })
    .await?;
    let clients = PostgresClientsRepository::init(PostgresClientsRepositoryConfig {
        hostname: settings.db_host.clone(),
        username: settings.db_username.clone(),
        password: settings.db_password.clone(),
    })
    .await?;
    Ok((Arc::new(rooms), Arc::new(clients)))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_telemetry();

    let settings = StoreSettings::from_env().expect("Failed to read settings");
    let (rooms_repository, clients_repository) = init_repositories(&settings)
        .await
        .expect("Failed to init repositories");

    tracing::info!("starting HTTP server at http://localhost:{}", settings.bind_port);

    HttpServer::new(move || {
        App::new()
            .wrap_api()
            .app_data(web::Data::new(rooms_repository.clone()))
            .app_data(web::Data::new(clients_repository.clone()))
            .wrap(TracingLogger::default())
            .configure(config_app)
            .with_json_spec_at("/apispec/v2")
            .build()
    })
    .bind(("0.0.0.0", settings.bind_port))?
    .run()
    .await
}
