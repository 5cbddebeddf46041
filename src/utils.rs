use actix_web::http::StatusCode;
use actix_web::HttpResponse;

/// Envelope shared by every JSON answer the API gives to the landing page.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ApiResponse<'a> {
    pub success: bool,
    pub message: &'a str,
}

pub fn json_success(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse {
        success: true,
        message,
    })
}

pub fn json_failure(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse {
        success: false,
        message,
    })
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
