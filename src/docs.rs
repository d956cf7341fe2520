use crate::api::{dashboard, presence, users};
use crate::auth::handlers;
use crate::model::presence::{PresenceEntry, PresencePatch, PresenceStatus};
use crate::model::role::Role;
use crate::model::user::User;
use crate::models::{CreatePresenceEntry, DeleteResponse, LoginReqDto, LoginResponse, RegisterReq};
use crate::service::DashboardData;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Team Presence API",
        version = "1.0.0",
        description = r#"
## Team Presence Tracker

Team members record where they work each day (in office, from home or on
vacation) up to two weeks ahead; managers see and adjust the whole team.

### Rules
- Entries may be booked from today up to 14 days ahead, one per user per day
- Team members manage their own entries; managers may manage anyone's
- Whoever created an entry may update or delete it

### Security
All `/api` endpoints require a **JWT Bearer** token from `/auth/login`.
"#,
    ),
    paths(
        handlers::register,
        handlers::login,

        users::me,
        users::list_users,

        presence::list_entries,
        presence::create_entry,
        presence::update_entry,
        presence::delete_entry,

        dashboard::get_dashboard
    ),
    components(
        schemas(
            User,
            Role,
            PresenceEntry,
            PresenceStatus,
            PresencePatch,
            CreatePresenceEntry,
            DeleteResponse,
            DashboardData,
            RegisterReq,
            LoginReqDto,
            LoginResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "Account lookup"),
        (name = "Presence", description = "Daily presence entries"),
        (name = "Dashboard", description = "Weekly team calendar"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
