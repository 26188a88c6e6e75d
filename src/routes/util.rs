use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::{header, StatusCode},
    HttpRequest, HttpResponse, ResponseError,
};
use itertools::Itertools;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::util::Error;

/// Characters escaped inside a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// The `{code, message, data}` wrapper every response body uses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// HTTP status code, repeated in the body.
    pub code: u16,
    pub message: String,
    /// Payload; `null` for errors and write acknowledgements.
    pub data: Option<T>,
}

pub fn respond<T: Serialize>(
    status: StatusCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse {
        code: status.as_u16(),
        message: message.into(),
        data,
    })
}

pub fn ok(data: impl Serialize) -> HttpResponse {
    respond(StatusCode::OK, "execute ok", Some(data))
}

/// Appends `segments` to the request path, percent-encoding each one.
pub fn location(req: &HttpRequest, segments: &[&str]) -> String {
    segments
        .iter()
        .fold(req.uri().path().to_owned(), |mut path, segment| {
            path.push('/');
            path.extend(utf8_percent_encode(segment, PATH_SEGMENT));
            path
        })
}

pub fn created(req: &HttpRequest, segments: &[&str], message: &str) -> HttpResponse {
    let mut response = respond(StatusCode::CREATED, message, None::<String>);
    if let Ok(value) = header::HeaderValue::from_str(&location(req, segments)) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

pub fn accepted(message: &str) -> HttpResponse {
    respond(StatusCode::ACCEPTED, message, None::<String>)
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::DuplicateBlueprint { .. } => StatusCode::FORBIDDEN,
            Error::Invalid(_) => StatusCode::BAD_REQUEST,
            Error::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        respond(status, self.to_string(), None::<String>)
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .sorted_by_key(|(field, _)| *field)
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .join(", ");
        Error::Invalid(message)
    }
}

/// Turns unreadable JSON bodies into a 400 envelope instead of actix's plain-text default.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = respond(
        StatusCode::BAD_REQUEST,
        format!("Validation error: {}", err),
        None::<String>,
    );
    InternalError::from_response(err, response).into()
}
