use actix_web::web;

use crate::strategy::Strategy;

pub mod assets;
pub mod demo;
pub mod health;
pub mod index;

/// Stylesheets and scripts under the public directory, e.g. `/style.css?delay=500`.
pub const ASSET_PATTERN: &str = "/{file:[^./][^.]*}.{ext:css|js}";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index::index))
        .route(Strategy::NoStore.path(), web::get().to(demo::no_store))
        .route(Strategy::ETag.path(), web::get().to(demo::etag))
        .route(Strategy::LastModified.path(), web::get().to(demo::last_modified))
        .route(Strategy::MaxAge.path(), web::get().to(demo::max_age))
        .route("/health", web::get().to(health::health))
        .route(ASSET_PATTERN, web::get().to(assets::asset));
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use actix_web::web;
    use chrono::{DateTime, TimeZone, Utc};

    use crate::clock::Clock;
    use crate::config::Config;
    use crate::AppState;

    pub fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 3, 14, 15, 9, 26).unwrap()
    }

    pub fn state(config: Config, clock: Arc<dyn Clock + Send + Sync>) -> web::Data<AppState> {
        web::Data::new(AppState::new(config, clock).unwrap())
    }
}
