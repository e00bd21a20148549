use actix_web::{HttpRequest, HttpResponse, web};
use log::debug;

use crate::AppState;
use crate::engine::Decision;
use crate::payload::generate_random_string;
use crate::render::{RenderError, Representation};
use crate::strategy::Strategy;
use crate::validator::ConditionalRequest;

pub async fn no_store(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    demo_page(&req, &data, Strategy::NoStore)
}

pub async fn etag(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    demo_page(&req, &data, Strategy::ETag)
}

pub async fn last_modified(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    demo_page(&req, &data, Strategy::LastModified)
}

pub async fn max_age(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    demo_page(&req, &data, Strategy::MaxAge)
}

impl From<RenderError> for HttpResponse {
    fn from(e: RenderError) -> Self {
        log::error!("{}", e);
        HttpResponse::InternalServerError().body(format!("{}", e))
    }
}

pub fn demo_page(req: &HttpRequest, data: &AppState, strategy: Strategy) -> HttpResponse {
    let conditional = ConditionalRequest::from_headers(req.headers());

    let (time, headers) = match data.engine.evaluate(strategy, &conditional) {
        Decision::NotModified => {
            debug!("{} - 304 Not Modified", strategy);
            return HttpResponse::NotModified().finish();
        }
        Decision::Full { time, headers } => (time, headers),
    };

    let payload = generate_random_string(data.config.payload_min_length, data.config.payload_max_length);
    let title = data.engine.table().title(strategy);
    let representation = Representation {
        data: &payload,
        time: &time,
    };
    let body = match data.renderer.strategy(strategy, &title, &representation) {
        Ok(body) => body,
        Err(e) => return e.into(),
    };

    debug!("{} - 200 generated at {}", strategy, time);

    let mut response = HttpResponse::Ok();
    for (header_name, header_value) in headers.into_iter() {
        response.insert_header((header_name, header_value));
    }
    response.content_type(mime::TEXT_HTML_UTF_8).body(body)
}
