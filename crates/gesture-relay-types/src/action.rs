//! Global navigation actions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GestureError;

/// A device-level navigation command not expressed as touch geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalAction {
    Back,
    Home,
    Recents,
    Notifications,
    QuickSettings,
    PowerDialog,
}

impl GlobalAction {
    /// Every action, in platform id order.
    pub const ALL: [Self; 6] = [
        Self::Back,
        Self::Home,
        Self::Recents,
        Self::Notifications,
        Self::QuickSettings,
        Self::PowerDialog,
    ];

    /// The symbolic name used on the command surface.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Home => "home",
            Self::Recents => "recents",
            Self::Notifications => "notifications",
            Self::QuickSettings => "quick_settings",
            Self::PowerDialog => "power_dialog",
        }
    }
}

impl std::fmt::Display for GlobalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GlobalAction {
    type Err = GestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|action| action.name() == normalised)
            .ok_or_else(|| GestureError::UnknownAction(s.to_string()))
    }
}

/// Platform identifier for a global action, as understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformActionId(pub u32);

impl PlatformActionId {
    pub const BACK: Self = Self(1);
    pub const HOME: Self = Self(2);
    pub const RECENTS: Self = Self(3);
    pub const NOTIFICATIONS: Self = Self(4);
    pub const QUICK_SETTINGS: Self = Self(5);
    pub const POWER_DIALOG: Self = Self(6);
}

impl std::fmt::Display for PlatformActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_names_and_dashes() {
        assert_eq!("back".parse::<GlobalAction>().unwrap(), GlobalAction::Back);
        assert_eq!(
            "Quick-Settings".parse::<GlobalAction>().unwrap(),
            GlobalAction::QuickSettings
        );
        assert_eq!(
            " power_dialog ".parse::<GlobalAction>().unwrap(),
            GlobalAction::PowerDialog
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "screenshot".parse::<GlobalAction>().unwrap_err();
        assert_eq!(err, GestureError::UnknownAction("screenshot".to_string()));
    }

    #[test]
    fn display_matches_serde_name() {
        for action in GlobalAction::ALL {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{action}\""));
        }
    }
}
