//! Joke handlers.
//!
//! ```text
//! GET    /jokes
//! GET    /jokes/random
//! GET    /jokes/new
//! POST   /jokes/new          name=..&content=..
//! GET    /jokes/{joke_id}
//! POST   /jokes/{joke_id}    _method=delete
//! DELETE /jokes/{joke_id}
//! ```
//!
//! Mutations take the body as an unread [`web::Payload`] and buffer it only
//! after the session has passed the authorization gate, so anonymous callers
//! are turned away before anything they sent is read.

use actix_web::{HttpResponse, delete, get, http::header, post, web};
use serde::Serialize;
use serde_json::json;
use url::form_urlencoded;

use crate::domain::ports::{DEFAULT_LIST_LIMIT, JokeView, RandomJoke};
use crate::domain::{Error, JOKES_PATH, JokeId, JokeSubmission, JokeSummary, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    DeleteFormSchema, ErrorSchema, JokeFormSchema, JokeSummarySchema, JokeViewSchema,
    RandomJokeSchema,
};
use crate::inbound::http::session::{SessionContext, with_login_hint};
use crate::inbound::http::state::HttpState;

const NEW_JOKE_PATH: &str = "/jokes/new";
const NOT_FOUND: &str = "What a joke! Not found.";
const DELETE_MISSING: &str = "Can't delete what does not exist";
const METHOD_FIELD: &str = "_method";
/// Largest form body buffered for an identified caller.
pub const FORM_BODY_LIMIT: usize = 64 * 1024;

/// Collection listing returned by `GET /jokes`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct JokeList {
    #[schema(value_type = Vec<JokeSummarySchema>)]
    pub jokes: Vec<JokeSummary>,
}

/// Register joke routes. Literal segments go before `{joke_id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_jokes)
        .service(random_joke)
        .service(new_joke_page)
        .service(submit_joke)
        .service(get_joke)
        .service(joke_form_action)
        .service(delete_joke);
}

fn first_value(body: &[u8], key: &str) -> Option<String> {
    form_urlencoded::parse(body)
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

fn submission_from_form(body: &[u8]) -> JokeSubmission {
    JokeSubmission {
        name: first_value(body, "name"),
        content: first_value(body, "content"),
    }
}

async fn read_form(payload: web::Payload) -> Result<web::Bytes, Error> {
    match payload.to_bytes_limited(FORM_BODY_LIMIT).await {
        Ok(Ok(body)) => Ok(body),
        Ok(Err(err)) => Err(Error::invalid_request(format!(
            "form body could not be read: {err}"
        ))),
        Err(_) => Err(Error::invalid_request("form body is too large")
            .with_details(json!({ "limit": FORM_BODY_LIMIT }))),
    }
}

fn parse_joke_id(raw: &str, missing: &'static str) -> Result<JokeId, Error> {
    raw.parse().map_err(|_| Error::not_found(missing))
}

fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// List the most recent jokes.
#[utoipa::path(
    get,
    path = "/jokes",
    responses(
        (status = 200, description = "Newest jokes first", body = JokeList),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jokes"],
    operation_id = "listJokes",
    security([])
)]
#[get("/jokes")]
pub async fn list_jokes(state: web::Data<HttpState>) -> ApiResult<web::Json<JokeList>> {
    let jokes = state.jokes.list_jokes(DEFAULT_LIST_LIMIT).await?;
    Ok(web::Json(JokeList { jokes }))
}

/// Show a joke picked uniformly at random.
#[utoipa::path(
    get,
    path = "/jokes/random",
    responses(
        (status = 200, description = "Random joke", body = RandomJokeSchema),
        (status = 404, description = "No jokes exist (code `empty`)", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jokes"],
    operation_id = "randomJoke",
    security([])
)]
#[get("/jokes/random")]
pub async fn random_joke(state: web::Data<HttpState>) -> ApiResult<web::Json<RandomJoke>> {
    Ok(web::Json(state.jokes.load_random().await?))
}

/// Guard for the new-joke page.
#[utoipa::path(
    get,
    path = "/jokes/new",
    responses(
        (status = 200, description = "Caller may submit a joke"),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["jokes"],
    operation_id = "newJokePage"
)]
#[get("/jokes/new")]
pub async fn new_joke_page(session: SessionContext) -> ApiResult<HttpResponse> {
    if session.identity().is_none() {
        return Err(with_login_hint(
            Error::unauthorized("You must be logged in to create a joke"),
            NEW_JOKE_PATH,
        ));
    }
    Ok(HttpResponse::Ok().json(json!({})))
}

/// Submit a new joke owned by the caller.
///
/// A rejected submission answers 400 with the field errors and echoed
/// fields in `details`.
#[utoipa::path(
    post,
    path = "/jokes/new",
    request_body(content = JokeFormSchema, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Stored; redirects to the joke", headers(("Location" = String, description = "Path of the new joke"))),
        (status = 400, description = "Submission rejected", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jokes"],
    operation_id = "submitJoke"
)]
#[post("/jokes/new")]
pub async fn submit_joke(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let author = session.require_identity(NEW_JOKE_PATH)?;
    let body = read_form(payload).await?;
    let joke = state
        .jokes_command
        .submit_joke(&author, submission_from_form(&body))
        .await?;
    Ok(see_other(joke.id().path()))
}

/// Show one joke and whether the caller owns it.
#[utoipa::path(
    get,
    path = "/jokes/{joke_id}",
    params(("joke_id" = String, Path, description = "Joke identifier")),
    responses(
        (status = 200, description = "Joke", body = JokeViewSchema),
        (status = 404, description = "Joke not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jokes"],
    operation_id = "getJoke",
    security([])
)]
#[get("/jokes/{joke_id}")]
pub async fn get_joke(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<JokeView>> {
    let id = parse_joke_id(&path, NOT_FOUND)?;
    let view = state.jokes.load_joke(&id, session.identity()).await?;
    Ok(web::Json(view))
}

/// Form action on a joke page. Only `_method=delete` is supported.
#[utoipa::path(
    post,
    path = "/jokes/{joke_id}",
    params(("joke_id" = String, Path, description = "Joke identifier")),
    request_body(content = DeleteFormSchema, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Deleted; redirects to the collection", headers(("Location" = String, description = "Collection path"))),
        (status = 400, description = "Unsupported form action or oversized body", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Joke not found", body = ErrorSchema)
    ),
    tags = ["jokes"],
    operation_id = "jokeFormAction"
)]
#[post("/jokes/{joke_id}")]
pub async fn joke_form_action(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let actor = session.require_identity(&joke_path(&path))?;
    let body = read_form(payload).await?;
    let method = first_value(&body, METHOD_FIELD);
    if method.as_deref() != Some("delete") {
        return Err(Error::invalid_request("unsupported form action")
            .with_details(json!({ "field": METHOD_FIELD, "value": method })));
    }
    remove_joke(&state, &actor, &path).await
}

/// Delete a joke owned by the caller.
#[utoipa::path(
    delete,
    path = "/jokes/{joke_id}",
    params(("joke_id" = String, Path, description = "Joke identifier")),
    responses(
        (status = 303, description = "Deleted; redirects to the collection", headers(("Location" = String, description = "Collection path"))),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Joke not found", body = ErrorSchema)
    ),
    tags = ["jokes"],
    operation_id = "deleteJoke"
)]
#[delete("/jokes/{joke_id}")]
pub async fn delete_joke(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_identity(&joke_path(&path))?;
    remove_joke(&state, &actor, &path).await
}

fn joke_path(raw_id: &str) -> String {
    format!("{JOKES_PATH}/{raw_id}")
}

async fn remove_joke(state: &HttpState, actor: &UserId, raw_id: &str) -> ApiResult<HttpResponse> {
    let id = parse_joke_id(raw_id, DELETE_MISSING)?;
    state.jokes_command.delete_joke(actor, &id).await?;
    Ok(see_other(JOKES_PATH.to_owned()))
}

#[cfg(test)]
#[path = "jokes_tests.rs"]
mod tests;
