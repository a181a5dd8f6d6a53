use quake_api::{LookupOutcome, LookupQuery, lookup};

use crate::config::{LookupArgs, ServerConfig};
use crate::error::ServerError;

pub async fn run(args: LookupArgs) -> Result<(), ServerError> {
    let config = ServerConfig::load(&args.config)?;
    let store = config.open_store()?;
    store.init().await?;

    let query = LookupQuery::new(&args.region, args.year, args.month);
    let outcome = lookup(store.as_ref(), &query).await;
    store.close().await?;

    match outcome? {
        LookupOutcome::Found(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        LookupOutcome::NotFound => {
            tracing::info!(row_key = %query.row_key(), "row not found");
            println!("not found: {}", query.row_key());
        }
    }
    Ok(())
}
