use actix_web::{
    error::InternalError,
    web::{self},
};
use common::error::AppError;

pub mod routes {
    pub mod sub;
}

pub mod services {
    pub mod sub;
}

pub mod dtos {
    pub mod sub;
}

/// Mounts the subscription CRUD routes under `/subscriptions`.
pub fn mount_subscriptions() -> actix_web::Scope {
    web::scope("/subscriptions")
        .app_data(json_config())
        .service(routes::sub::get_subscriptions)
        .service(routes::sub::post_subscription)
        .service(routes::sub::get_subscription)
        .service(routes::sub::put_subscription)
        .service(routes::sub::delete_subscription)
}

/// Malformed bodies (unknown status literal, non-numeric cost, bad date)
/// are answered with a 400 in the same JSON shape as every other error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let app_error = AppError::BadRequest(err.to_string());
        let response = app_error.to_http_response();
        InternalError::from_response(err, response).into()
    })
}
