use actix_web::{
    HttpResponse,
    Responder,
};

use crate::snippets::language_options;

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

pub async fn check_version() -> impl Responder {
    HttpResponse::Ok().body(env!("CARGO_PKG_VERSION"))
}

/// Language picker entries with their starter programs.
pub async fn list_languages() -> impl Responder {
    HttpResponse::Ok().json(language_options())
}
