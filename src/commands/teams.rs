use colored::Colorize;

use crate::cli::{TeamFieldsArgs, UpdateArgs};
use crate::client::TeamApi;
use crate::error::{Result, TeamAdminError};
use crate::output;
use crate::types::{Team, TeamDraft, TeamId};
use crate::view::team_rows;

impl From<TeamFieldsArgs> for TeamDraft {
    fn from(args: TeamFieldsArgs) -> Self {
        Self {
            name: args.name,
            region: args.region,
            description: args.description,
        }
    }
}

fn validated(draft: TeamDraft) -> Result<TeamDraft> {
    match draft.missing_field() {
        Some(field) => Err(TeamAdminError::MissingField(field)),
        None => Ok(draft),
    }
}

pub async fn list(client: &impl TeamApi) -> Result<()> {
    let teams = client.list().await?;
    output::print_table(&teams, team_rows);
    Ok(())
}

pub async fn show(client: &impl TeamApi, id: &str) -> Result<()> {
    let team = client.get(&TeamId::from(id)).await?;
    output::print_item(&team, print_team);
    Ok(())
}

fn print_team(team: &Team) {
    println!("{}", team.name.bold());
    println!("  ID:          {}", team.id);
    println!("  Region:      {}", team.region);
    if !team.description.is_empty() {
        println!("  Description: {}", team.description);
    }
}

pub async fn create(client: &impl TeamApi, args: TeamFieldsArgs) -> Result<()> {
    let draft = validated(TeamDraft::from(args))?;
    client.create(&draft).await?;
    output::print_message(&format!("Created team {}", draft.name));
    Ok(())
}

pub async fn update(client: &impl TeamApi, args: UpdateArgs) -> Result<()> {
    let id = TeamId::new(args.id);
    let draft = validated(TeamDraft::from(args.fields))?;
    client.update(&id, &draft).await?;
    output::print_message(&format!("Updated team {id}"));
    Ok(())
}

pub async fn delete(client: &impl TeamApi, id: &str) -> Result<()> {
    let id = TeamId::from(id);
    client.delete(&id).await?;
    output::print_message(&format!("Deleted team {id}"));
    Ok(())
}
