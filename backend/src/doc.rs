//! OpenAPI document for the joke HTTP surface.
//!
//! Domain types stay free of utoipa; the wrappers in
//! [`crate::inbound::http::schemas`] describe them instead. Swagger UI serves
//! this document in debug builds and `openapi-dump` prints it.

use crate::inbound::http::jokes::JokeList;
use crate::inbound::http::schemas::{
    DeleteFormSchema, ErrorCodeSchema, ErrorSchema, FieldErrorsSchema, JokeFieldsSchema,
    JokeFormSchema, JokeMetaSchema, JokeSchema, JokeSummarySchema, JokeViewSchema,
    RandomJokeSchema, SubmissionFailureSchema,
};
use crate::inbound::http::session::SESSION_COOKIE_NAME;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the session cookie as the security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Signed session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the jokes service.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Jokes API",
        description = "Browse, submit and delete jokes. Mutations require a session."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::jokes::list_jokes,
        crate::inbound::http::jokes::random_joke,
        crate::inbound::http::jokes::new_joke_page,
        crate::inbound::http::jokes::submit_joke,
        crate::inbound::http::jokes::get_joke,
        crate::inbound::http::jokes::joke_form_action,
        crate::inbound::http::jokes::delete_joke,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        JokeSchema,
        JokeSummarySchema,
        JokeMetaSchema,
        JokeViewSchema,
        RandomJokeSchema,
        JokeList,
        JokeFormSchema,
        DeleteFormSchema,
        SubmissionFailureSchema,
        FieldErrorsSchema,
        JokeFieldsSchema,
    )),
    tags(
        (name = "jokes", description = "Reading and managing jokes"),
        (name = "users", description = "Session login and logout"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const JOKE_SCHEMA_NAME: &str = "crate.domain.Joke";
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    #[case(JOKE_SCHEMA_NAME, &["id", "name", "content", "jokesterId", "createdAt"])]
    #[case(ERROR_SCHEMA_NAME, &["code", "message", "traceId", "details"])]
    fn schemas_use_wire_field_names(#[case] name: &str, #[case] expected: &[&str]) {
        let fields = schema_fields(name);
        for field in expected {
            assert!(fields.iter().any(|f| f == field), "{name} lacks {field}");
        }
    }

    #[rstest]
    #[case("/jokes")]
    #[case("/jokes/random")]
    #[case("/jokes/new")]
    #[case("/jokes/{joke_id}")]
    #[case("/login")]
    #[case("/logout")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn joke_page_documents_post_and_delete() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/jokes/{joke_id}").expect("item path");
        assert!(item.get.is_some());
        assert!(item.post.is_some());
        assert!(item.delete.is_some());
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
