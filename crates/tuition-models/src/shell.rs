//! Navigation shell payloads.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::enums::UserRole;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SidebarMode {
    /// Full width with labels.
    #[default]
    Expanded,
    /// Icon-only width.
    Collapsed,
}

impl SidebarMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Expanded => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ShellQuery {
    /// Path currently displayed by the client, used to mark the active entry.
    pub path: Option<String>,
    pub sidebar: Option<SidebarMode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NavigationEntry {
    pub name: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SidebarFooter {
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShellView {
    pub title: String,
    /// Only shown while the sidebar is expanded.
    pub tagline: Option<String>,
    pub sidebar: SidebarMode,
    pub navigation: Vec<NavigationEntry>,
    /// Signed-in identity, only shown while the sidebar is expanded.
    pub footer: Option<SidebarFooter>,
    /// Header date, e.g. "Monday, 19 October 2026".
    pub today: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_toggle() {
        assert_eq!(SidebarMode::Expanded.toggled(), SidebarMode::Collapsed);
        assert_eq!(SidebarMode::Collapsed.toggled(), SidebarMode::Expanded);
        assert!(SidebarMode::default().is_expanded());
    }

    #[test]
    fn test_sidebar_mode_deserializes_lowercase() {
        let mode: SidebarMode = serde_json::from_str(r#""collapsed""#).unwrap();
        assert_eq!(mode, SidebarMode::Collapsed);
    }
}
