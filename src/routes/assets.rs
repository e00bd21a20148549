use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use actix_web::error::BlockingError;
use actix_web::{HttpResponse, web};
use log::{debug, warn};
use serde::Deserialize;

use crate::AppState;

#[derive(Debug)]
pub enum AssetError {
    NotFound(String),
    Io(io::Error),
    Blocking(BlockingError),
}

impl From<BlockingError> for AssetError {
    fn from(e: BlockingError) -> Self {
        AssetError::Blocking(e)
    }
}

impl From<AssetError> for HttpResponse {
    fn from(e: AssetError) -> Self {
        return match e {
            AssetError::NotFound(asset) => HttpResponse::NotFound().body(format!("Asset not found: {}", asset)),
            _ => {
                warn!("Failed to serve asset: {:#?}", e);
                HttpResponse::InternalServerError().body(format!("{:#?}", e))
            }
        };
    }
}

#[derive(Deserialize)]
pub struct AssetQuery {
    /// Artificial latency in milliseconds.
    delay: Option<u64>,
}

fn content_type(extension: &str) -> mime::Mime {
    match extension {
        "css" => mime::TEXT_CSS,
        "js" => mime::TEXT_JAVASCRIPT,
        _ => mime::TEXT_PLAIN,
    }
}

/// Resolves `file.extension` under `public_dir`. Only plain relative names are
/// accepted; absolute paths, `..` and `.` components yield `None`.
fn asset_path(public_dir: &Path, file: &str, extension: &str) -> Option<PathBuf> {
    let name = PathBuf::from(format!("{}.{}", file, extension));
    if !name.components().all(|component| matches!(component, Component::Normal(_))) {
        return None;
    }
    Some(public_dir.join(name))
}

async fn read_asset(data: &AppState, file: &str, extension: &str) -> Result<String, AssetError> {
    let name = format!("{}.{}", file, extension);
    let path = match asset_path(&data.config.public_dir, file, extension) {
        Some(path) => path,
        None => {
            warn!("Refusing asset outside the public directory: {}", name);
            return Err(AssetError::NotFound(name));
        }
    };
    let content = web::block(move || std::fs::read_to_string(path)).await?;
    content.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AssetError::NotFound(name),
        _ => AssetError::Io(e),
    })
}

pub async fn asset(
    path: web::Path<(String, String)>,
    query: web::Query<AssetQuery>,
    data: web::Data<AppState>,
) -> HttpResponse {
    let (file, extension) = path.into_inner();

    if let Some(delay) = query.delay {
        let delay = delay.min(data.config.max_asset_delay_ms);
        debug!("Delaying {}.{} by {}ms", file, extension, delay);
        actix_rt::time::sleep(Duration::from_millis(delay)).await;
    }

    match read_asset(&data, &file, &extension).await {
        Ok(content) => HttpResponse::Ok().content_type(content_type(&extension)).body(content),
        Err(e) => e.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Instant;

    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};

    use crate::clock::testing::ManualClock;
    use crate::config::Config;
    use crate::routes::configure;
    use crate::routes::testing::{instant, state};

    use super::asset_path;

    fn public_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("style.css"), "body { color: red; }").unwrap();
        std::fs::write(dir.path().join("script.js"), "console.log(1);").unwrap();
        dir
    }

    fn config(dir: &tempfile::TempDir) -> Config {
        Config {
            public_dir: dir.path().to_path_buf(),
            max_asset_delay_ms: 50,
            ..Config::default()
        }
    }

    #[actix_rt::test]
    async fn test_serves_css_and_js() {
        let dir = public_dir();
        let clock = Arc::new(ManualClock::new(instant()));
        let app = test::init_service(App::new().app_data(state(config(&dir), clock)).configure(configure)).await;

        let response = test::call_service(&app, test::TestRequest::get().uri("/style.css").to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "text/css");
        assert_eq!(test::read_body(response).await, "body { color: red; }");

        let response = test::call_service(&app, test::TestRequest::get().uri("/script.js").to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "text/javascript");
    }

    #[actix_rt::test]
    async fn test_missing_asset() {
        let dir = public_dir();
        let clock = Arc::new(ManualClock::new(instant()));
        let app = test::init_service(App::new().app_data(state(config(&dir), clock)).configure(configure)).await;

        let response = test::call_service(&app, test::TestRequest::get().uri("/missing.css").to_request()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = test::call_service(&app, test::TestRequest::get().uri("/style.txt").to_request()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_delay_is_capped() {
        let dir = public_dir();
        let clock = Arc::new(ManualClock::new(instant()));
        let app = test::init_service(App::new().app_data(state(config(&dir), clock)).configure(configure)).await;

        let started = Instant::now();
        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/style.css?delay=60000").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let elapsed = started.elapsed().as_millis();
        assert!(elapsed >= 50 && elapsed < 5_000, "elapsed {}ms", elapsed);
    }

    #[actix_rt::test]
    async fn test_invalid_delay() {
        let dir = public_dir();
        let clock = Arc::new(ManualClock::new(instant()));
        let app = test::init_service(App::new().app_data(state(config(&dir), clock)).configure(configure)).await;

        let response = test::call_service(&app, test::TestRequest::get().uri("/style.css?delay=soon").to_request()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[::core::prelude::v1::test]
    fn test_asset_path_stays_in_public_dir() {
        let public = std::path::Path::new("/srv/public");
        assert_eq!(
            asset_path(public, "css/site", "css"),
            Some(public.join("css/site.css"))
        );
        assert_eq!(asset_path(public, "/tmp/secret", "css"), None);
        assert_eq!(asset_path(public, "../secret", "css"), None);
        assert_eq!(asset_path(public, "css/../../secret", "js"), None);
        assert_eq!(asset_path(public, "./style", "css"), None);
    }

    #[actix_rt::test]
    async fn test_absolute_path_is_not_served() {
        let dir = public_dir();
        let outside = tempfile::Builder::new().prefix("outside").tempdir().unwrap();
        let secret = outside.path().join("secret.css");
        std::fs::write(&secret, "secret").unwrap();
        let clock = Arc::new(ManualClock::new(instant()));
        let app = test::init_service(App::new().app_data(state(config(&dir), clock)).configure(configure)).await;

        let uri = format!("/{}", secret.display());
        let response = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_ne!(test::read_body(response).await, "secret");
    }
}
