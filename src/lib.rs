pub mod configuration;
pub mod domain;
pub mod email_clients;
pub mod middleware;
pub mod notification;
pub mod rate_limit;
pub mod routes;
pub mod sanitizer;
pub mod startup;
pub mod telemetry;
pub mod templating;
pub mod utils;
