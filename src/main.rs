use clap::Parser;
use dotenvy::dotenv;

use classdesk::cli::{Cli, Commands, create_admin};
use classdesk::classdesk_config::{DatabaseConfig, ServerConfig};
use classdesk::logging::init_tracing;
use classdesk::router::init_router;
use classdesk::state::{init_app_state, init_stores};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await,
        Commands::CreateAdmin {
            first_name,
            last_name,
            username,
            password,
        } => {
            let database_config = DatabaseConfig::from_env();
            if database_config.url.is_none() {
                anyhow::bail!("DATABASE_URL must be set to create an admin");
            }

            let stores = init_stores(&database_config).await?;
            let account =
                create_admin(&stores, &first_name, &last_name, &username, &password).await?;

            println!("Admin created: {} ({})", account.username, account.id);
            Ok(())
        }
    }
}

async fn serve() -> anyhow::Result<()> {
    init_tracing()?;

    let state = init_app_state().await?;
    let app = init_router(state);

    let server_config = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    tracing::info!(address = %server_config.address(), "server listening");
    tracing::info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app).await?;
    Ok(())
}
