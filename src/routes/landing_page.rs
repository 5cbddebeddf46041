use actix_files::{Files, NamedFile};
use actix_web::{web, HttpRequest, HttpResponse};
use std::path::{Path, PathBuf};

/// Location of the marketing site's `index.html`.
#[derive(Debug, Clone)]
pub struct LandingPage(pub PathBuf);

impl LandingPage {
    pub fn in_dir(static_dir: &Path) -> Self {
        Self(static_dir.join("index.html"))
    }
}

/// Mounts the static site at `/`. Paths without a matching file fall back
/// to the landing page.
///
/// Nothing is mounted when `static_dir` does not exist, so requests never
/// resolve against the working directory.
pub fn static_files(cfg: &mut web::ServiceConfig, static_dir: &Path) {
    if static_dir.is_dir() {
        cfg.service(
            Files::new("/", static_dir)
                .index_file("index.html")
                .default_handler(web::to(landing_page)),
        );
    }
}

/// Serves `index.html` for any unmatched path, or a plain-text 404 when the
/// site has no landing page.
pub async fn landing_page(req: HttpRequest, page: web::Data<LandingPage>) -> HttpResponse {
    match NamedFile::open_async(&page.0).await {
        Ok(file) => file.into_response(&req),
        Err(_) => HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("Not found"),
    }
}
