/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Authenticated session state
//!
//! Values the portal client would otherwise memoize implicitly (the team
//! list, the selected team, the in-house flag) are explicit optional fields
//! here, filled on first use and dropped through the invalidation methods.

use crate::error::AppError;
use crate::model::responses::{Team, sort_teams};
use chrono::{DateTime, Utc};
use reqwest::cookie::Jar;
use std::sync::Arc;
use tracing::warn;

/// State of one signed-in portal session
#[derive(Debug, Clone)]
pub struct Session {
    jar: Arc<Jar>,
    current_team_id: Option<String>,
    teams: Option<Vec<Team>>,
    in_house: Option<bool>,
    logged_in_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a session around the cookie jar of the HTTP layer
    ///
    /// # Arguments
    /// * `jar` - Cookie jar shared with the HTTP client
    /// * `team_id` - Team fixed up front, if any
    pub fn new(jar: Arc<Jar>, team_id: Option<String>) -> Self {
        Self {
            jar,
            current_team_id: team_id,
            teams: None,
            in_house: None,
            logged_in_at: None,
        }
    }

    /// Cookie jar holding the authentication cookies
    pub fn jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    /// Records a successful login
    pub fn mark_logged_in(&mut self) {
        self.logged_in_at = Some(Utc::now());
    }

    /// When the session last signed in
    pub fn logged_in_at(&self) -> Option<DateTime<Utc>> {
        self.logged_in_at
    }

    /// Whether the session has signed in
    pub fn is_logged_in(&self) -> bool {
        self.logged_in_at.is_some()
    }

    /// Team selected explicitly or resolved earlier
    pub fn current_team_id(&self) -> Option<&str> {
        self.current_team_id.as_deref()
    }

    /// Selects a team, dropping the in-house flag computed for the old one
    pub fn set_team_id(&mut self, team_id: &str) {
        self.current_team_id = Some(team_id.to_string());
        self.in_house = None;
    }

    /// Memoized team list, if fetched
    pub fn teams(&self) -> Option<&[Team]> {
        self.teams.as_deref()
    }

    /// Stores the team list sorted by name, then identifier
    pub fn set_teams(&mut self, mut teams: Vec<Team>) -> &[Team] {
        sort_teams(&mut teams);
        self.teams.insert(teams)
    }

    /// Memoized in-house flag, if computed
    pub fn in_house(&self) -> Option<bool> {
        self.in_house
    }

    /// Stores the in-house flag of the current team
    pub fn set_in_house(&mut self, in_house: bool) {
        self.in_house = Some(in_house);
    }

    /// Drops the memoized team list and in-house flag
    ///
    /// The selected team survives; only derived data is fetched again.
    pub fn invalidate_teams(&mut self) {
        self.teams = None;
        self.in_house = None;
    }

    /// Resolves the team to operate on without touching the network
    ///
    /// Returns the explicit selection when there is one. Otherwise picks
    /// the first of `teams` (already sorted) and remembers it. A session
    /// with access to several teams gets a diagnostic; one without any team
    /// fails with [`AppError::NoAccess`].
    pub fn resolve_team_id(&mut self, username: &str) -> Result<String, AppError> {
        if let Some(team_id) = &self.current_team_id {
            return Ok(team_id.clone());
        }
        let teams = self.teams.as_deref().unwrap_or_default();
        let first = teams.first().ok_or_else(|| {
            AppError::NoAccess(format!(
                "user '{username}' does not have access to any teams with an active membership"
            ))
        })?;
        if teams.len() > 1 {
            warn!(
                "The current user is in {} teams. Pass a team ID or call `select_team` to choose a team. Using the first one for now.",
                teams.len()
            );
        }
        let team_id = first.team_id.clone();
        self.current_team_id = Some(team_id.clone());
        Ok(team_id)
    }

    /// Team record of the selected team, if it is in the memoized list
    pub fn team_information(&self) -> Option<&Team> {
        let team_id = self.current_team_id.as_deref()?;
        self.teams.as_ref()?.iter().find(|t| t.team_id == team_id)
    }
}
