use crate::{
    api::{dashboard, presence, users},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
    error::AppError,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use anyhow::{Result, anyhow};

type LimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-route rate limits. Built once so every worker shares the same buckets.
pub struct RateLimits {
    login: LimiterConfig,
    register: LimiterConfig,
    protected: LimiterConfig,
}

impl RateLimits {
    pub fn from_config(config: &Config) -> Result<Self> {
        fn build_limiter(requests_per_min: u32) -> Result<LimiterConfig> {
            let burst = requests_per_min.max(1);
            let per_ms = 60_000 / burst as u64;

            GovernorConfigBuilder::default()
                .milliseconds_per_request(per_ms.max(1))
                .burst_size(burst)
                .key_extractor(PeerIpKeyExtractor)
                .finish()
                .ok_or_else(|| anyhow!("invalid rate limit: {requests_per_min}/min"))
        }

        Ok(Self {
            login: build_limiter(config.rate_login_per_min)?,
            register: build_limiter(config.rate_register_per_min)?,
            protected: build_limiter(config.rate_protected_per_min)?,
        })
    }
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limits: &RateLimits) {
    // malformed bodies and query strings use the same error shape as everything else
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _| AppError::invalid(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _| AppError::invalid(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _| AppError::invalid(err.to_string()).into()),
    );

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(Governor::new(&limits.login))
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(Governor::new(&limits.register))
                    .route(web::post().to(handlers::register)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(Governor::new(&limits.protected)) // rate limiting
            .service(
                web::scope("/users")
                    .service(web::resource("").route(web::get().to(users::list_users)))
                    .service(web::resource("/me").route(web::get().to(users::me))),
            )
            .service(
                web::scope("/presence")
                    // /presence
                    .service(
                        web::resource("")
                            .route(web::get().to(presence::list_entries))
                            .route(web::post().to(presence::create_entry)),
                    )
                    // /presence/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(presence::update_entry))
                            .route(web::delete().to(presence::delete_entry)),
                    ),
            )
            .service(web::resource("/dashboard").route(web::get().to(dashboard::get_dashboard))),
    );
}
