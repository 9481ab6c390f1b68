use crate::error::AppError;
use std::fmt;
use std::str::FromStr;

/// The five fixed lineup positions, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Adc,
    Support,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Adc, Role::Support];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Top => "Top",
            Role::Jungle => "Jungle",
            Role::Mid => "Mid",
            Role::Adc => "ADC",
            Role::Support => "Support",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Role::Top),
            "jungle" | "jgl" => Ok(Role::Jungle),
            "mid" | "middle" => Ok(Role::Mid),
            "adc" | "bot" | "bottom" => Ok(Role::Adc),
            "support" | "sup" | "utility" => Ok(Role::Support),
            other => Err(AppError::ConfigError(format!("Unknown role '{}'", other))),
        }
    }
}

const DEFAULT_ROSTER: [(&str, Role); 5] = [
    ("ILYXOU", Role::Top),
    ("Goliah", Role::Jungle),
    ("iwanan", Role::Mid),
    ("Marth", Role::Adc),
    ("Mahonix", Role::Support),
];

/// Static player-name-to-role table for the home team.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    players: Vec<(String, Role)>,
}

impl Roster {
    /// Parse `Name:Role,Name:Role,...`.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let mut players = Vec::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, role) = entry.split_once(':').ok_or_else(|| {
                AppError::ConfigError(format!("Roster entry '{}' must look like Name:Role", entry))
            })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::ConfigError(format!(
                    "Roster entry '{}' has an empty player name",
                    entry
                )));
            }
            players.push((name.to_string(), role.parse()?));
        }

        if players.is_empty() {
            return Err(AppError::ConfigError("Roster is empty".to_string()));
        }

        Ok(Roster { players })
    }

    /// Case-insensitive lookup of a player's role.
    pub fn role_of(&self, player: &str) -> Option<Role> {
        self.players
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(player))
            .map(|(_, role)| *role)
    }

    pub fn contains(&self, player: &str) -> bool {
        self.role_of(player).is_some()
    }

    pub fn player_for(&self, role: Role) -> Option<&str> {
        self.players
            .iter()
            .find(|(_, r)| *r == role)
            .map(|(name, _)| name.as_str())
    }

    pub fn players(&self) -> impl Iterator<Item = &(String, Role)> {
        self.players.iter()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Roster {
            players: DEFAULT_ROSTER
                .iter()
                .map(|(name, role)| (name.to_string(), *role))
                .collect(),
        }
    }
}
