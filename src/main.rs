use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    middleware::{self, Logger},
    web, App, HttpServer,
};
use anyhow::Context;

use crate::{
    config::{Config, Store},
    db::{InMemoryGateway, MongoGateway, PersistenceGateway},
    services::BlueprintsService,
};

mod config;
mod db;
mod filters;
mod models;
mod routes;
mod services;
mod util;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()?;

    let gateway: Arc<dyn PersistenceGateway> = match &config.store {
        Store::Memory => Arc::new(InMemoryGateway::new()),
        Store::Mongo { uri } => Arc::new(
            MongoGateway::connect(uri)
                .await
                .context("failed to set up the mongodb store")?,
        ),
    };

    let service = BlueprintsService::new(gateway, config.filter);
    log::info!(
        "serving blueprints from the {} store with the {} filter",
        config.store,
        service.filter()
    );
    let service = web::Data::new(service);

    log::info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(middleware::Compress::default())
            .wrap(Cors::permissive())
            .app_data(service.clone())
            .configure(routes::config)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    log::info!("bye!");
    Ok(())
}
