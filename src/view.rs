use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use crate::dashboard::{Ready, ViewState};
use crate::types::{Team, TeamDraft};

pub const EMPTY_TABLE: &str = "No teams found.";

#[derive(Tabled, Debug, PartialEq, Eq)]
pub struct TeamRow {
    #[tabled(rename = "#")]
    pub row: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Region")]
    pub region: String,
}

/// Table rows in received order, or one placeholder row for an empty list
pub fn team_rows(teams: &[Team]) -> Vec<TeamRow> {
    if teams.is_empty() {
        return vec![TeamRow {
            row: String::new(),
            name: EMPTY_TABLE.to_string(),
            region: String::new(),
        }];
    }

    teams
        .iter()
        .enumerate()
        .map(|(i, team)| TeamRow {
            row: (i + 1).to_string(),
            name: team.name.clone(),
            region: team.region.clone(),
        })
        .collect()
}

pub fn render(view: &ViewState, draft: &TeamDraft) -> String {
    match view {
        ViewState::Loading => "Loading...".to_string(),
        ViewState::Error(message) => format!("Error: {message}").red().to_string(),
        ViewState::Ready(ready) => render_ready(ready, draft),
    }
}

fn render_ready(ready: &Ready, draft: &TeamDraft) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", "Team Admin Dashboard".bold()));

    if let Some(notice) = &ready.notice {
        out.push_str(&format!("{}\n\n", format!("Error: {notice}").red()));
    }

    if ready.form_visible {
        let heading = if ready.edit_target.is_some() {
            "Edit Team"
        } else {
            "Add New Team"
        };
        out.push_str(&format!("{}\n", heading.bold()));
        out.push_str(&format!("  Name:        {}\n", draft.name));
        out.push_str(&format!("  Region:      {}\n", draft.region));
        out.push_str(&format!("  Description: {}\n\n", draft.description));
    }

    out.push_str(&format!("{}\n", "Current Teams".bold()));
    let table = Table::new(team_rows(&ready.teams))
        .with(Style::rounded())
        .to_string();
    out.push_str(&table);
    out
}
