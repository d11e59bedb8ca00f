use std::io::{self, Write};

use url::Url;

use crate::config::{Config, DEFAULT_BASE_URL};
use crate::error::{Result, TeamAdminError};
use crate::output;

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Team Admin Configuration");
    println!("========================\n");

    let base_url = prompt(&format!("Backend base URL [{DEFAULT_BASE_URL}]: "))?;
    let base_url = if base_url.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        base_url
    };
    let base_url = Url::parse(&base_url).map_err(|_| TeamAdminError::InvalidUrl(base_url.clone()))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| TeamAdminError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let config_content = format!("base_url = \"{base_url}\"\n");
    std::fs::write(&config_path, config_content).map_err(|e| TeamAdminError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    output::print_message(&format!("Config saved to {}", config_path.display()));

    Ok(())
}
