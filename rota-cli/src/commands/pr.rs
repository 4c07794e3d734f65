//! Pull request commands

use clap::{Args, Subcommand};
use rota_core::Config;

use super::print_pull_request;

/// Pull request commands
#[derive(Args, Debug)]
pub struct PrArgs {
    #[command(subcommand)]
    pub command: PrCommand,
}

#[derive(Subcommand, Debug)]
pub enum PrCommand {
    /// Register a pull request and assign reviewers from the author's team
    Create {
        /// Pull request identifier
        id: String,

        /// Pull request title
        title: String,

        /// Author's user id
        #[arg(short, long)]
        author: String,
    },

    /// Mark a pull request as merged
    Merge { id: String },

    /// Replace one assigned reviewer with another team member
    Reassign {
        /// Pull request identifier
        id: String,

        /// Reviewer to replace
        #[arg(long)]
        old_reviewer: String,
    },
}

impl PrArgs {
    /// Execute the pr command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let service = super::open_service(config).await?;

        match &self.command {
            PrCommand::Create { id, title, author } => {
                let pr = service.create_pull_request(id, title, author).await?;
                print_pull_request(&pr);
            }
            PrCommand::Merge { id } => {
                let pr = service.merge_pull_request(id).await?;
                print_pull_request(&pr);
            }
            PrCommand::Reassign { id, old_reviewer } => {
                let outcome = service.reassign_reviewer(id, old_reviewer).await?;
                println!("Replaced {} with {}", old_reviewer, outcome.replaced_by);
                print_pull_request(&outcome.pull_request);
            }
        }

        Ok(())
    }
}
