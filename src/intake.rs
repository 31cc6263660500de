use crate::actions;
use crate::errors::SubmissionError;
use crate::models::{RawSubmission, Submission};
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::error::InternalError;
use actix_web::{get, post, web, HttpResponse};
use diesel::pg::PgConnection;
use diesel::r2d2::ConnectionManager;
use log::{error, info};
use serde_json::{json, Value};

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Pool used to keep submitters in `users`. `None` means submissions are
/// only logged.
#[derive(Clone, Default)]
pub struct Persist(pub Option<DbPool>);

impl RawSubmission {
    pub fn validate(self) -> Result<Submission, SubmissionError> {
        Ok(Submission {
            email: required("email", self.email)?,
            username: required("username", self.username)?,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, SubmissionError> {
    let value = value.ok_or(SubmissionError::MissingField(field))?;
    if value.is_empty() {
        return Err(SubmissionError::EmptyField(field));
    }
    Ok(value)
}

#[post("/hodi")]
async fn submit(
    persist: web::Data<Persist>,
    web::Json(raw): web::Json<RawSubmission>,
) -> Result<HttpResponse, actix_web::Error> {
    let submission = raw.validate()?;
    info!("hello {} {}", submission.email, submission.username);
    if let Some(pool) = persist.0.clone() {
        web::block(move || -> Result<_, failure::Error> {
            let db = pool.get()?;
            Ok(actions::record_user(&db, &submission)?)
        })
        .await
        .map_err(|e| {
            error!("unable to record submission: {:?}", e);
            e
        })?;
    }
    Ok(HttpResponse::Ok().json(json!({ "answer": "hodi" })))
}

#[get("/hodi")]
async fn welcome() -> web::Json<Value> {
    web::Json(json!({ "welcome browser": "da" }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(submit).service(welcome);
}

/// Malformed bodies get the same JSON error shape as failed validation.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
            InternalError::from_response(err, response).into()
        })
}

pub fn cors() -> actix_cors::CorsFactory {
    Cors::new()
        .send_wildcard()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_header(header::CONTENT_TYPE)
        .finish()
}
