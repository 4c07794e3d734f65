//! Team management commands

use clap::{Args, Subcommand};
use rota_core::{Config, Team, User};

/// Team management commands
#[derive(Args, Debug)]
pub struct TeamArgs {
    #[command(subcommand)]
    pub command: TeamCommand,
}

#[derive(Subcommand, Debug)]
pub enum TeamCommand {
    /// Register a new team with its members
    Add {
        /// Team name
        name: String,

        /// Member as ID:NAME, or ID:NAME:inactive (repeatable)
        #[arg(short, long = "member", value_parser = parse_member)]
        members: Vec<User>,
    },

    /// Show a team and its members
    Show {
        /// Team name
        name: String,
    },
}

impl TeamArgs {
    /// Execute the team command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let service = super::open_service(config).await?;

        match &self.command {
            TeamCommand::Add { name, members } => {
                let team = members
                    .iter()
                    .cloned()
                    .fold(Team::new(name.clone()), Team::with_member);
                let team = service.add_team(team).await?;
                println!("Created team {} with {} members", team.name, team.members.len());
            }
            TeamCommand::Show { name } => {
                let team = service.get_team(name).await?;
                println!("Team: {}", team.name);
                if team.members.is_empty() {
                    println!("  (no members)");
                }
                for member in &team.members {
                    let state = if member.is_active { "active" } else { "inactive" };
                    println!("  {} {} ({})", member.id, member.name, state);
                }
            }
        }

        Ok(())
    }
}

fn parse_member(s: &str) -> Result<User, String> {
    let mut parts = s.splitn(3, ':');
    let id = parts.next().unwrap_or_default();
    let name = parts
        .next()
        .ok_or_else(|| format!("expected ID:NAME[:inactive], got '{s}'"))?;
    let is_active = match parts.next() {
        None | Some("active") => true,
        Some("inactive") => false,
        Some(other) => return Err(format!("unknown member state '{other}'")),
    };
    if id.is_empty() || name.is_empty() {
        return Err(format!("member id and name must be non-empty, got '{s}'"));
    }
    Ok(User::new(id, name, "").with_active(is_active))
}
