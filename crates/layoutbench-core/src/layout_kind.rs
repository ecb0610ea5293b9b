//! Layout strategy tags

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The layout strategy under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Grid,
    Subgrid,
    Table,
    Flex,
}

impl LayoutKind {
    /// All strategies in trigger-surface order.
    pub const ALL: [LayoutKind; 4] = [
        LayoutKind::Grid,
        LayoutKind::Subgrid,
        LayoutKind::Table,
        LayoutKind::Flex,
    ];

    /// Stable lowercase tag, used in result lines and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Grid => "grid",
            LayoutKind::Subgrid => "subgrid",
            LayoutKind::Table => "table",
            LayoutKind::Flex => "flex",
        }
    }

    /// Label of the trigger that starts a run of this strategy.
    pub fn trigger_label(&self) -> &'static str {
        match self {
            LayoutKind::Grid => "Test Grid Resizing",
            LayoutKind::Subgrid => "Test Sub Grid Resizing",
            LayoutKind::Table => "Test Table Resizing",
            LayoutKind::Flex => "Test Flex Resizing",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(LayoutKind::Grid),
            "subgrid" | "sub-grid" => Ok(LayoutKind::Subgrid),
            "table" => Ok(LayoutKind::Table),
            "flex" | "flexbox" => Ok(LayoutKind::Flex),
            other => Err(format!("unknown layout kind '{}'", other)),
        }
    }
}
