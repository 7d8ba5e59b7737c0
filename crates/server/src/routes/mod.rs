pub mod generate;
pub mod summarize;
pub mod system;

use actix_web::web;

/// Body limit for JSON and form requests (transcripts can be long)
const BODY_LIMIT_BYTES: usize = 32 * 1024 * 1024;

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(BODY_LIMIT_BYTES))
        .app_data(web::FormConfig::default().limit(BODY_LIMIT_BYTES))
        .service(system::root)
        .service(system::health)
        .service(generate::generate)
        .service(summarize::summarize_upload)
        .service(summarize::summarize_link)
        .service(summarize::summarize_text);
}
