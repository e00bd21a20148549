use actix_web::http::header;
use actix_web::{HttpResponse, web};

use crate::AppState;
use crate::policy::CachePolicy;

pub async fn health(data: web::Data<AppState>) -> HttpResponse {
    if !data.config.public_dir.is_dir() {
        return HttpResponse::InternalServerError()
            .insert_header((header::CACHE_CONTROL, CachePolicy::NoStore.to_string()))
            .body(format!("Public directory {:#?} is missing", data.config.public_dir));
    }
    return HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, CachePolicy::NoStore.to_string()))
        .body("ok");
}
