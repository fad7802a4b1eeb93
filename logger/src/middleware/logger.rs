//! # Logger Middleware Module
//!
//! Logs every HTTP request handled by the service: method, path, status code
//! and latency at info level, and the JSON request body plus error response
//! bodies at debug level.
//!
//! ## Usage
//! ```rust,ignore
//! App::new()
//!     .wrap(logger::middleware(console_logging_enabled))
//!     .service(/* routes */)
//! ```

use actix_web::body::{self, BoxBody, MessageBody};
use actix_web::dev::Payload;
use actix_web::error::PayloadError;
use actix_web::web::{self, Bytes};
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use actix_web::{HttpMessage, HttpResponse, ResponseError};
use colored::Colorize;
use futures::StreamExt;
use futures::future::{LocalBoxFuture, Ready, ready};
use log::{debug, info};
use serde_json::Value;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

/// Matches the default `web::JsonConfig` limit.
pub const MAX_BODY_SIZE: usize = 2_097_152;

pub struct LoggerMiddleware {
    console_logging_enabled: bool,
}

impl LoggerMiddleware {
    pub fn new(console_logging_enabled: bool) -> Self {
        Self {
            console_logging_enabled,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
    <B as MessageBody>::Error: ResponseError,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = LoggerMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoggerMiddlewareService {
            service: Arc::new(service),
            console_logging_enabled: self.console_logging_enabled,
        }))
    }
}

pub struct LoggerMiddlewareService<S> {
    service: Arc<S>,
    console_logging_enabled: bool,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
    <B as MessageBody>::Error: ResponseError,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let srv = Arc::clone(&self.service);

        if !self.console_logging_enabled {
            return Box::pin(async move {
                let res = srv.call(req).await?;
                Ok(res.map_into_boxed_body())
            });
        }

        let method = req.method().to_string();
        let path = req.path().to_string();
        let started = Instant::now();

        Box::pin(async move {
            // Copy request body from payload and reconstruct it
            let mut payload = req.take_payload();
            let body_bytes = match extract_body(&mut payload, MAX_BODY_SIZE).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    info!(
                        "[{}] {} {} (body over {} bytes)",
                        "413".bright_red(),
                        method,
                        path.bright_white(),
                        MAX_BODY_SIZE
                    );
                    return Ok(req.error_response(err));
                }
            };
            let request_body = parse_json(&body_bytes);
            let new_stream: Pin<
                Box<dyn futures::Stream<Item = Result<Bytes, PayloadError>>>,
            > = futures::stream::once(async move {
                Ok::<Bytes, PayloadError>(body_bytes)
            })
            .boxed();
            req.set_payload(Payload::from(new_stream));

            // Call next services
            let res = srv.call(req).await?;
            let status = res.status();
            let status_code = status.as_u16();

            // Copy response body and reconstruct response
            let (req, res) = res.into_parts();
            let headers = res.headers().clone();
            let response_body_bytes = body::to_bytes(res.into_body()).await?;
            let response_body = parse_json(&response_body_bytes);
            let response_text = String::from_utf8_lossy(&response_body_bytes).to_string();
            let mut new_res = HttpResponse::build(status);
            for (key, value) in headers.iter() {
                new_res.insert_header((key.clone(), value.clone()));
            }
            let res = ServiceResponse::new(req, new_res.body(response_body_bytes));

            let colored_status = match status_code {
                200..=299 => status_code.to_string().green(),
                300..=399 => status_code.to_string().yellow(),
                400..=499 => status_code.to_string().bright_red(),
                _ => status_code.to_string().red(),
            };

            let colored_method = match method.as_str() {
                "GET" => method.blue(),
                "POST" => method.yellow(),
                "PUT" => method.purple(),
                "DELETE" => method.red(),
                _ => method.normal(),
            };

            info!(
                "[{}] {} {} {}",
                colored_status,
                colored_method,
                path.bright_white(),
                format!("({}ms)", started.elapsed().as_millis()).bright_black(),
            );

            if let Some(body) = request_body.as_object() {
                if !body.is_empty() {
                    debug!("  Request: {}", request_body.to_string().bright_green());
                }
            }

            if status_code >= 400 {
                let shown = if response_body.is_null() {
                    response_text
                } else {
                    response_body.to_string()
                };
                debug!("  Response: {}", shown.bright_yellow());
            }

            Ok(res)
        })
    }
}

fn parse_json(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(bytes).unwrap_or(Value::Null)
    }
}

/// Reads the request body, giving up once it grows past `limit` bytes.
async fn extract_body(payload: &mut Payload, limit: usize) -> Result<Bytes, Error> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        if body.len() + chunk.len() > limit {
            return Err(PayloadError::Overflow.into());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}
