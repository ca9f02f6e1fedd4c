/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Interactive team selection
//!
//! Only ever invoked through [`crate::application::client::Client::select_team`];
//! automatic team resolution never prompts.

use crate::error::AppError;
use crate::model::responses::Team;
use prettytable::{Cell, Row, Table, format};
use std::io::{self, BufRead, Write};

/// Picks one team out of the teams a session can reach
pub trait TeamSelector: Send + Sync {
    /// Returns the identifier of the chosen team
    fn select_team(&self, teams: &[Team]) -> Result<String, AppError>;
}

/// Prompts on the terminal with a numbered table of teams
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalTeamSelector;

impl TerminalTeamSelector {
    /// Creates a terminal selector
    pub fn new() -> Self {
        Self
    }
}

impl TeamSelector for TerminalTeamSelector {
    fn select_team(&self, teams: &[Team]) -> Result<String, AppError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        prompt_team(teams, &mut stdin.lock(), &mut stdout.lock())
    }
}

/// Renders the team table
pub fn teams_table(teams: &[Team]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.add_row(Row::new(vec![
        Cell::new("#"),
        Cell::new("TEAM ID"),
        Cell::new("NAME"),
        Cell::new("TYPE"),
    ]));
    for (index, team) in teams.iter().enumerate() {
        let team_type = serde_json::to_value(&team.team_type)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(Row::new(vec![
            Cell::new(&(index + 1).to_string()),
            Cell::new(&team.team_id),
            Cell::new(&team.name),
            Cell::new(&team_type),
        ]));
    }
    table
}

/// Prints the table and reads a 1-based choice until one is valid
///
/// # Returns
/// * `Ok(String)` - Identifier of the chosen team
/// * `Err(AppError::NoAccess)` - There is nothing to choose from
/// * `Err(AppError::InvalidInput)` - Input ended before a valid choice
pub fn prompt_team<R: BufRead, W: Write>(
    teams: &[Team],
    input: &mut R,
    output: &mut W,
) -> Result<String, AppError> {
    if teams.is_empty() {
        return Err(AppError::NoAccess(
            "no teams available for selection".to_string(),
        ));
    }

    writeln!(output, "{}", teams_table(teams))?;
    loop {
        write!(output, "Select a team (1-{}): ", teams.len())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(AppError::InvalidInput(
                "no team selected".to_string(),
            ));
        }
        match line.trim().parse::<usize>() {
            Ok(choice) if (1..=teams.len()).contains(&choice) => {
                return Ok(teams[choice - 1].team_id.clone());
            }
            _ => writeln!(output, "Invalid selection '{}'", line.trim())?,
        }
    }
}
