use std::fmt::Display;
use std::io;
use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use log::{debug, info, warn};

use clock::{Clock, ClockResolution, SystemClock};
use config::Config;
use engine::ValidationEngine;
use render::{RenderError, Renderer};
use strategy::StrategyTable;

mod clock;
mod config;
mod engine;
mod logging;
mod payload;
mod policy;
mod render;
mod routes;
mod strategy;
mod validator;

pub struct AppState {
    pub engine: ValidationEngine,
    pub renderer: Renderer,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, clock: Arc<dyn Clock + Send + Sync>) -> Result<AppState, RenderError> {
        let table = StrategyTable::new(config.max_age);
        let renderer = Renderer::new(&table)?;
        let engine = ValidationEngine::new(
            table,
            clock,
            config.clock_resolution,
            config.last_modified_comparison,
        );
        Ok(AppState {
            engine,
            renderer,
            config,
        })
    }
}

fn startup_error<E: Display>(e: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::load().map_err(startup_error)?;
    logging::init(config.log_config.as_deref()).map_err(startup_error)?;

    match serde_yaml::to_string(&config) {
        Ok(dump) => debug!("Effective configuration:\n{}", dump),
        Err(e) => warn!("Could not serialize configuration: {}", e),
    }
    if config.clock_resolution != ClockResolution::Seconds {
        warn!(
            "Clock resolution is {:?}; validators change faster than a second and will rarely match",
            config.clock_resolution
        );
    }

    let address = (config.host.clone(), config.port);
    let state = web::Data::new(AppState::new(config.clone(), Arc::new(SystemClock)).map_err(startup_error)?);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind(address)?;

    let shown_host = if config.host == "0.0.0.0" { "localhost" } else { config.host.as_str() };
    info!("Your app is listening on http://{}:{}", shown_host, config.port);

    server.run().await
}
