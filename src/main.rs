use stash_ledger::{
    config::{self, database, units},
    core::{item, report},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenvy::dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Connect and make sure the schema exists
    let database_url = database::get_database_url(app_config.database_url.as_deref());
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to {}: {}", database_url, e))?;
    database::create_tables(&db).await?;

    // 5. Seed unit preferences on first run
    let prefs = units::seed_unit_preferences(&db, &app_config.units).await?;
    info!("Unit preferences: {:?}", prefs);

    // 6. Print an inventory report for every item
    let items = item::get_all_items(&db).await?;
    if items.is_empty() {
        println!("No items recorded yet.");
    }
    for item in items {
        let item_report = report::generate_inventory_report(&db, item.id, Some(5)).await?;
        println!("{}", report::format_inventory_report(&item_report));
    }

    Ok(())
}
