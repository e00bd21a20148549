use actix_web::{HttpResponse, web};

use crate::AppState;

pub async fn index(data: web::Data<AppState>) -> HttpResponse {
    match data.renderer.welcome() {
        Ok(body) => HttpResponse::Ok().content_type(mime::TEXT_HTML_UTF_8).body(body),
        Err(e) => e.into(),
    }
}
