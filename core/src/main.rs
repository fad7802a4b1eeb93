mod cors;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::env_config::{ANY_ORIGIN, Config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup(config.log_file.as_deref()).expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, config.db_max_connections)
        .await
        .expect("Failed to set up database");

    log::info!(
        "Subscription service ({}) listening on http://{}:{}",
        config.environment,
        config.server_host,
        config.server_port
    );

    if config.is_production() && config.cors_allowed_origin == ANY_ORIGIN {
        log::warn!("CORS is open to any origin");
    }

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(logger::middleware(config_data.console_logging_enabled)) // 2nd
            .wrap(cors::middleware(&config_data.cors_allowed_origin)) // 1st
            .service(api_subs::mount_subscriptions())
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
