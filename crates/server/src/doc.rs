use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation; paths are collected from the router
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Catalog", description = "Departments, faculty, courses, and sections"),
        (name = "Enrollment", description = "Enrolling in and dropping sections"),
        (name = "Schedule", description = "The signed-in student's week"),
        (name = "Coursework", description = "Assignments and exams"),
        (name = "Dashboard", description = "Role based dashboards"),
        (name = "Profile", description = "The signed-in user's account"),
    ),
    info(
        title = "Campus API",
        version = "1.0.0",
        description = "University campus management API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
