use std::net::TcpListener;

use leadrelay::{
    configuration::get_configuration,
    email_clients::EmailClient,
    startup::run,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the logger
    let subscriber = get_subscriber("leadrelay".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    let configuration = get_configuration()?;

    let email_client = EmailClient::from_settings(&configuration.email_client)?;

    let addr_to_bind = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&addr_to_bind)?;
    tracing::info!(address = %addr_to_bind, "Listening for form submissions");

    run(
        listener,
        email_client,
        &configuration.application,
        &configuration.rate_limit,
    )?
    .await?;

    Ok(())
}
