use actix_cors::Cors;
use actix_web::http::header;
use common::env_config::ANY_ORIGIN;

pub fn middleware(origin: &str) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if origin == ANY_ORIGIN {
        cors.allow_any_origin()
    } else {
        cors.allowed_origin(origin)
    }
}
