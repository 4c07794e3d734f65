//! User management commands

use clap::{Args, Subcommand};
use rota_core::Config;

/// User management commands
#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Make a user eligible for review again
    Activate { id: String },

    /// Stop assigning new reviews to a user
    Deactivate { id: String },

    /// List pull requests a user is assigned to review
    Reviews { id: String },
}

impl UserArgs {
    /// Execute the user command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let service = super::open_service(config).await?;

        match &self.command {
            UserCommand::Activate { id } | UserCommand::Deactivate { id } => {
                let active = matches!(self.command, UserCommand::Activate { .. });
                let user = service.set_user_active(id, active).await?;
                let state = if user.is_active { "active" } else { "inactive" };
                println!("{} ({}) is now {}", user.id, user.team_name, state);
            }
            UserCommand::Reviews { id } => {
                let prs = service.reviews_for_user(id).await?;
                if prs.is_empty() {
                    println!("No reviews assigned to {id}.");
                }
                for pr in &prs {
                    println!("{} [{}] {} (by {})", pr.id, pr.status.as_str(), pr.title, pr.author_id);
                }
            }
        }

        Ok(())
    }
}
