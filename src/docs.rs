use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{LoginRequest, TokenResponse, WechatLoginRequest};
use crate::modules::users::model::{ChangePasswordRequest, MessageResponse, UserProfile};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::wechat_login,
        crate::modules::users::controller::me,
        crate::modules::users::controller::change_password,
    ),
    components(
        schemas(
            LoginRequest,
            WechatLoginRequest,
            TokenResponse,
            UserProfile,
            ChangePasswordRequest,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token issuance"),
        (name = "Users", description = "Authenticated user endpoints")
    ),
    info(
        title = "Slateboard API",
        version = "0.1.0",
        description = "Education platform REST API with stateless JWT authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
