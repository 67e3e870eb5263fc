use anyhow::Context;
use futures::future::join_all;
use sqlx::PgPool;
use tracing::{error, info, instrument};

use super::fixtures::fixture_users;
use crate::config::SeedConfig;
use crate::db;
use crate::users::repo::PgUserStore;

const SEED_MAX_CONNECTIONS: u32 = 5;

/// What a seed run managed to do. Failures are logged, never returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub connected: bool,
    pub dropped: usize,
    pub inserted: u64,
}

#[instrument(skip(config), fields(wipe = config.wipe))]
pub async fn run(config: &SeedConfig) -> SeedReport {
    let mut report = SeedReport::default();

    let pool = match config.database_url.as_deref() {
        Some(url) => match db::connect(url, SEED_MAX_CONNECTIONS).await {
            Ok(pool) => {
                info!("database connected");
                Some(pool)
            }
            Err(e) => {
                error!(error = ?e, "could not connect to the database");
                None
            }
        },
        None => None,
    };

    let Some(pool) = pool else {
        error!("error during seeding: no database connection");
        return report;
    };
    report.connected = true;

    if let Err(e) = seed(&pool, config.wipe, &mut report).await {
        error!(error = ?e, "error during seeding");
    }

    pool.close().await;
    info!("seed connection closed");
    report
}

async fn seed(pool: &PgPool, wipe: bool, report: &mut SeedReport) -> anyhow::Result<()> {
    if wipe {
        report.dropped = drop_all_tables(pool).await?;
        info!(dropped = report.dropped, "old data deleted");
    }

    // Recreates the users table after a wipe; no-op on an up-to-date schema.
    db::migrate(pool).await?;

    let users = fixture_users()?;
    report.inserted = PgUserStore::new(pool.clone()).insert_many(&users).await?;
    info!(inserted = report.inserted, "user data seeded");
    Ok(())
}

/// Drops every table of the current schema concurrently and waits for all
/// drops before reporting the first failure.
async fn drop_all_tables(pool: &PgPool) -> anyhow::Result<usize> {
    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT tablename::text FROM pg_catalog.pg_tables WHERE schemaname = current_schema()",
    )
    .fetch_all(pool)
    .await
    .context("list tables")?;

    let drops = tables.iter().map(|table| {
        let sql = format!("DROP TABLE IF EXISTS {} CASCADE", quote_ident(table));
        async move {
            sqlx::query(&sql)
                .execute(pool)
                .await
                .with_context(|| format!("drop table {table}"))
        }
    });

    join_all(drops)
        .await
        .into_iter()
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(tables.len())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("users"), "\"users\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[tokio::test]
    async fn missing_target_is_logged_not_raised() {
        let report = run(&SeedConfig {
            database_url: None,
            wipe: true,
        })
        .await;
        assert_eq!(report, SeedReport::default());
    }
}
