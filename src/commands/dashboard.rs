use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::client::TeamApi;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::view;

const HELP: &str = "COMMANDS:
    add                  Open an empty form
    edit <row>           Load the team at <row> into the form
    name <text>          Set the form name
    region <text>        Set the form region
    description <text>   Set the form description
    save                 Create or update from the form
    cancel               Hide the form
    delete <row>         Delete the team at <row>
    reload               Fetch the team list again
    help                 Show this help
    quit                 Leave the dashboard";

#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Add,
    Edit(usize),
    Name(String),
    Region(String),
    Description(String),
    Save,
    Cancel,
    Delete(usize),
    Reload,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let row = |rest: &str| {
            rest.parse::<usize>()
                .map_err(|_| format!("'{word}' needs a row number"))
        };

        match word.to_lowercase().as_str() {
            "add" | "new" => Ok(Self::Add),
            "edit" => row(rest).map(Self::Edit),
            "name" => Ok(Self::Name(rest.to_string())),
            "region" => Ok(Self::Region(rest.to_string())),
            "description" | "desc" => Ok(Self::Description(rest.to_string())),
            "save" => Ok(Self::Save),
            "cancel" => Ok(Self::Cancel),
            "delete" | "rm" => row(rest).map(Self::Delete),
            "reload" => Ok(Self::Reload),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(format!("Unknown command '{word}', type 'help'")),
        }
    }
}

pub async fn run(client: impl TeamApi) -> Result<()> {
    let mut dashboard = Dashboard::new(client);
    dashboard.on_change(|view, draft| println!("{}\n", view::render(view, draft)));
    dashboard.load().await;

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{}", message.red());
                continue;
            }
        };

        tracing::debug!("Dashboard command: {:?}", command);
        if !execute(&mut dashboard, command).await {
            break;
        }
    }

    Ok(())
}

/// Apply one command; returns false when the session should end.
async fn execute<A: TeamApi>(dashboard: &mut Dashboard<A>, command: ShellCommand) -> bool {
    match command {
        ShellCommand::Add => dashboard.begin_create(),
        ShellCommand::Edit(row) => match dashboard.team_at(row) {
            Ok(team) => dashboard.begin_edit(&team),
            Err(e) => eprintln!("{}", e.to_string().red()),
        },
        ShellCommand::Name(name) => dashboard.set_name(name),
        ShellCommand::Region(region) => dashboard.set_region(region),
        ShellCommand::Description(description) => dashboard.set_description(description),
        ShellCommand::Save => dashboard.submit().await,
        ShellCommand::Cancel => dashboard.cancel_form(),
        ShellCommand::Delete(row) => match dashboard.team_at(row) {
            Ok(team) => dashboard.delete(&team.id).await,
            Err(e) => eprintln!("{}", e.to_string().red()),
        },
        ShellCommand::Reload => dashboard.load().await,
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => return false,
    }
    true
}
