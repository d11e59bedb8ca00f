use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "team-admin")]
#[command(about = "Admin dashboard for team records on a REST backend", version)]
#[command(after_help = "EXAMPLES:
    team-admin dashboard                        Open the interactive dashboard
    team-admin list                             List all teams
    team-admin create -n Falcons -r EU          Create a team
    team-admin update <ID> -n Falcons -r NA     Update a team
    team-admin delete <ID>                      Delete a team")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides TEAM_ADMIN_BASE_URL and the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format (table, json)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive dashboard
    #[command(
        alias = "d",
        after_help = "Inside the dashboard type 'help' for the list of commands."
    )]
    Dashboard,
    /// List teams
    #[command(
        alias = "ls",
        after_help = "EXAMPLES:
    team-admin list
    team-admin list --format json"
    )]
    List,
    /// Show a single team
    #[command(after_help = "EXAMPLES:
    team-admin show 3f2b6c1e-5d1a-4c39-9a56-0c1f3e0b7a21")]
    Show {
        /// Team ID
        id: String,
    },
    /// Create a new team
    #[command(after_help = "EXAMPLES:
    team-admin create -n Falcons -r EU
    team-admin create -n Falcons -r EU -d \"Flagship roster\"")]
    Create(TeamFieldsArgs),
    /// Replace an existing team's fields
    #[command(after_help = "EXAMPLES:
    team-admin update <ID> -n Falcons -r NA")]
    Update(UpdateArgs),
    /// Delete a team
    #[command(after_help = "EXAMPLES:
    team-admin delete <ID>")]
    Delete {
        /// Team ID
        id: String,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    team-admin completions bash > ~/.bash_completion.d/team-admin
    team-admin completions zsh > ~/.zfunc/_team-admin
    team-admin completions fish > ~/.config/fish/completions/team-admin.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Args)]
pub struct TeamFieldsArgs {
    /// Team name
    #[arg(long, short)]
    pub name: String,

    /// Region
    #[arg(long, short)]
    pub region: String,

    /// Free-text description
    #[arg(long, short, default_value = "")]
    pub description: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Team ID
    pub id: String,

    #[command(flatten)]
    pub fields: TeamFieldsArgs,
}
