//! OpenAPI document for the REST surface.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::rest::{dto, response};

#[derive(OpenApi)]
#[openapi(
    info(title = "Taskhub API", description = "Authenticated, ownership-scoped task API"),
    paths(
        crate::api::rest::handlers::signup,
        crate::api::rest::handlers::login,
        crate::api::rest::handlers::me,
        crate::api::rest::handlers::list_tasks,
        crate::api::rest::handlers::create_task,
        crate::api::rest::handlers::get_task,
        crate::api::rest::handlers::replace_task,
        crate::api::rest::handlers::patch_task,
        crate::api::rest::handlers::delete_task,
    ),
    components(schemas(
        dto::UserDto,
        dto::TaskDto,
        dto::SignupReq,
        dto::LoginReq,
        dto::TaskBodyReq,
        dto::TaskPatchReq,
        dto::AuthData,
        dto::UserData,
        dto::TaskData,
        dto::TasksData,
        dto::MessageData,
        response::ApiFailure,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Signup, login and identity"),
        (name = "tasks", description = "Owner-scoped task CRUD and listing")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_every_endpoint() {
        let doc = ApiDoc::openapi();
        let value = serde_json::to_value(&doc).unwrap();

        for path in ["/auth/signup", "/auth/login", "/auth/me", "/tasks", "/tasks/{id}"] {
            assert!(
                value["paths"].get(path).is_some(),
                "missing path {path} in OpenAPI document"
            );
        }
        assert!(value["components"]["securitySchemes"]["bearer"].is_object());
    }
}
