use crate::error::AppError;
use crate::roster::Roster;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub dashboard_password: Option<String>,
    pub team_tag: String,
    pub team_name: String,
    pub roster: Roster,
    pub locale: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let data_dir = env::var("SCRIM_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let dashboard_password = env::var("SCRIM_DASHBOARD_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());

        let team_tag = env::var("SCRIM_TEAM_TAG").unwrap_or_else(|_| "GMB".to_string());
        let team_name =
            env::var("SCRIM_TEAM_NAME").unwrap_or_else(|_| "GMBLERS Esports".to_string());

        let roster = match env::var("SCRIM_ROSTER") {
            Ok(raw) => Roster::parse(&raw)?,
            Err(_) => Roster::default(),
        };

        let locale = env::var("DDRAGON_LOCALE").unwrap_or_else(|_| "en_US".to_string());

        Ok(Config {
            data_dir,
            dashboard_password,
            team_tag,
            team_name,
            roster,
            locale,
        })
    }

    /// Whether a draft team label refers to the home team.
    pub fn is_home_team_label(&self, team: &str) -> bool {
        (!self.team_tag.is_empty() && team.contains(&self.team_tag)) || team == self.team_name
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("data"),
            dashboard_password: None,
            team_tag: "GMB".to_string(),
            team_name: "GMBLERS Esports".to_string(),
            roster: Roster::default(),
            locale: "en_US".to_string(),
        }
    }
}
