use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tubestream::database;
use tubestream::services::admin_auth::ensure_admin;
use tubestream::services::seed::seed_sample_videos;

const DEFAULT_ADMIN_EMAIL: &str = "admin@tubestream.com";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tubestream=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let with_samples = std::env::args().skip(1).any(|arg| arg == "--samples");

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());
    let password = std::env::var("ADMIN_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty())
        .context("ADMIN_PASSWORD must be set")?;

    let db = database::create_pool(&database_url)
        .await
        .context("connecting to database")?;

    tracing::info!("Start seeding...");

    ensure_admin(&db, &email, &password)
        .await
        .context("creating admin")?;

    if with_samples {
        seed_sample_videos(&db)
            .await
            .context("creating sample videos")?;
    }

    tracing::info!("Seeding finished.");
    database::close(&db).await;
    Ok(())
}
