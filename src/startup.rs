use crate::configuration::{ApplicationSettings, RateLimitSettings};
use crate::domain::{BookingForm, BookingRequest, ContactForm, ContactMessage};
use crate::email_clients::EmailClient;
use crate::middleware::{enforce_origin, security_headers, AllowedOrigins};
use crate::rate_limit::{form_rate_limit, global_rate_limit, RateLimiters};
use crate::routes::{health_check, landing_page, static_files, submit, LandingPage};
use crate::utils::json_failure;
use actix_web::dev::Server;
use actix_web::http::StatusCode;
use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpResponse, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

// A 2000-character message in a non-Latin script is ~18 KB once percent-encoded.
const FORM_BODY_LIMIT: usize = 64 * 1024;

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    application: &ApplicationSettings,
    rate_limit: &RateLimitSettings,
) -> Result<Server, std::io::Error> {
    let trusted_proxies = application
        .trusted_proxies()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let email_client = web::Data::new(email_client);
    let allowed_origins = web::Data::new(AllowedOrigins::new(
        application.allowed_origins.iter().cloned(),
    ));
    let rate_limiters = web::Data::new(RateLimiters::new(
        trusted_proxies,
        rate_limit.global,
        rate_limit.forms,
    ));
    let static_dir = application.static_dir.clone();
    if !static_dir.is_dir() {
        tracing::warn!(static_dir = %static_dir.display(), "Static directory not found; only the API is served");
    }
    let landing = web::Data::new(LandingPage::in_dir(&static_dir));

    let server = HttpServer::new(move || {
        // Last wrap runs first: logging, headers, origin check, then the global limit.
        App::new()
            .wrap(from_fn(global_rate_limit))
            .wrap(from_fn(enforce_origin))
            .wrap(security_headers())
            .wrap(TracingLogger::default())
            .app_data(email_client.clone())
            .app_data(allowed_origins.clone())
            .app_data(rate_limiters.clone())
            .app_data(landing.clone())
            .app_data(web::FormConfig::default().limit(FORM_BODY_LIMIT))
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(health_check))
                    .service(
                        web::resource("/booking")
                            .wrap(from_fn(form_rate_limit))
                            .route(web::post().to(submit::<BookingForm, BookingRequest>))
                            .default_service(web::to(method_not_allowed)),
                    )
                    .service(
                        web::resource("/contact")
                            .wrap(from_fn(form_rate_limit))
                            .route(web::post().to(submit::<ContactForm, ContactMessage>))
                            .default_service(web::to(method_not_allowed)),
                    )
                    .default_service(web::to(|| async {
                        json_failure(StatusCode::NOT_FOUND, "Not found.")
                    })),
            )
            .configure(|cfg| static_files(cfg, &static_dir))
            .default_service(web::to(landing_page))
    })
    .listen(listener)?
    .run();

    Ok(server)
}

async fn method_not_allowed() -> HttpResponse {
    json_failure(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed.")
}
