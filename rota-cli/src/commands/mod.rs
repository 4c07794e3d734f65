//! CLI command implementations

pub mod pr;
pub mod serve;
pub mod team;
pub mod user;

use std::sync::Arc;

use rota_core::{Config, PullRequest, ReviewService};
use rota_db::{Database, SqliteStore};

pub use pr::PrArgs;
pub use serve::ServeArgs;
pub use team::TeamArgs;
pub use user::UserArgs;

/// Open the configured database and build a service on top of it
async fn open_service(config: &Config) -> anyhow::Result<ReviewService> {
    let db = Database::connect(&config.database).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to open database {}: {}",
            config.database.path.display(),
            e
        )
    })?;
    Ok(ReviewService::new(Arc::new(SqliteStore::new(db))))
}

fn print_pull_request(pr: &PullRequest) {
    println!("{} [{}] {}", pr.id, pr.status.as_str(), pr.title);
    println!("  Author: {}", pr.author_id);
    if pr.reviewers.is_empty() {
        println!("  Reviewers: (none)");
    } else {
        println!("  Reviewers: {}", pr.reviewers.join(", "));
    }
    if let Some(at) = pr.merged_at {
        println!("  Merged: {}", at.to_rfc3339());
    }
}
