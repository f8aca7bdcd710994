use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub email: String, pub password: String, pub name: String }

#[derive(ToSchema)]
pub struct TokenRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct TokenDoc { pub token: String }

#[derive(ToSchema)]
pub struct UserDoc { pub id: i32, pub email: String, pub name: String }

#[derive(ToSchema)]
pub struct TratamientoSummaryDoc {
    pub id: i32,
    pub codigo: String,
    pub nombre: String,
    pub duracion_minutos: i32,
    pub familia: Option<String>,
    /// Two decimals, e.g. "47.50"
    pub precio_base: String,
}

#[derive(ToSchema)]
pub struct TratamientoDetailDoc {
    pub id: i32,
    pub codigo: String,
    pub nombre: String,
    pub descripcion: String,
    pub duracion_minutos: i32,
    pub familia: Option<String>,
    pub precio_base: String,
}

#[derive(ToSchema)]
pub struct TratamientoInputDoc {
    /// Unique, at most 8 characters
    pub codigo: String,
    pub nombre: String,
    pub descripcion: String,
    pub duracion_minutos: i32,
    /// At most 2 characters
    pub familia: Option<String>,
    /// Number or numeric string, at most 999.99
    pub precio_base: String,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::token,
        crate::routes::auth::me,
        crate::routes::tratamientos::list,
        crate::routes::tratamientos::create,
        crate::routes::tratamientos::retrieve,
        crate::routes::tratamientos::update,
        crate::routes::tratamientos::partial_update,
        crate::routes::tratamientos::destroy,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            TokenRequest,
            TokenDoc,
            UserDoc,
            TratamientoSummaryDoc,
            TratamientoDetailDoc,
            TratamientoInputDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "user"),
        (name = "tratamientos")
    )
)]
pub struct ApiDoc;
