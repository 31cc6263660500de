use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use diesel::result::{ConnectionError, Error as QueryError};
use failure::Fail;
use serde_json::json;

/// A failed initializer stage. Every variant is fatal for the run.
#[derive(Debug, Fail)]
pub enum SetupError {
    #[fail(display = "unable to connect to database {}", target)]
    Connect {
        target: String,
        #[cause]
        cause: ConnectionError,
    },
    #[fail(display = "unable to check whether database {} exists", _0)]
    CheckDatabase(String, #[cause] QueryError),
    #[fail(display = "unable to create database {}", _0)]
    CreateDatabase(String, #[cause] QueryError),
    #[fail(display = "unable to create tables")]
    CreateTables(#[cause] QueryError),
    #[fail(display = "unable to insert initial data")]
    Seed(#[cause] QueryError),
    #[fail(display = "unable to read back seeded data")]
    Survey(#[cause] QueryError),
}

#[derive(Debug, Fail, PartialEq, Eq)]
pub enum SubmissionError {
    #[fail(display = "missing field `{}`", _0)]
    MissingField(&'static str),
    #[fail(display = "field `{}` must not be empty", _0)]
    EmptyField(&'static str),
}

impl ResponseError for SubmissionError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
