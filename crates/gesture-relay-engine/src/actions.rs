//! Symbolic navigation actions to platform action ids.

use gesture_relay_types::{GlobalAction, PlatformActionId};

/// Stateless lookup from [`GlobalAction`] to [`PlatformActionId`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalActionMap;

impl GlobalActionMap {
    pub fn lookup(self, action: GlobalAction) -> PlatformActionId {
        match action {
            GlobalAction::Back => PlatformActionId::BACK,
            GlobalAction::Home => PlatformActionId::HOME,
            GlobalAction::Recents => PlatformActionId::RECENTS,
            GlobalAction::Notifications => PlatformActionId::NOTIFICATIONS,
            GlobalAction::QuickSettings => PlatformActionId::QUICK_SETTINGS,
            GlobalAction::PowerDialog => PlatformActionId::POWER_DIALOG,
        }
    }
}
