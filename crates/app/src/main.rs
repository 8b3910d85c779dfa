use anyhow::Context;

use storefront_infra::{StorefrontConfig, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let config = StorefrontConfig::from_env().context("failed to load configuration")?;
    let pool = db::connect(&config)
        .await
        .with_context(|| format!("failed to open database at {}", config.database_url))?;
    db::migrate(&pool).await.context("failed to create schema")?;

    storefront_app::demo::run(&pool).await?;

    pool.close().await;
    Ok(())
}
