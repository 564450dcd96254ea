use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::engine::error::BackgroundError;

/// Content panel opened by clicking one of the reassembled words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    About,
    Services,
    Contact,
}

impl PanelId {
    pub const ALL: [PanelId; 3] = [PanelId::About, PanelId::Services, PanelId::Contact];

    /// Panel for a word group, in the order the words are laid out.
    pub fn from_group(group: usize) -> Option<Self> {
        Self::ALL.get(group).copied()
    }

    pub fn group(self) -> usize {
        match self {
            PanelId::About => 0,
            PanelId::Services => 1,
            PanelId::Contact => 2,
        }
    }

    /// Element id the host page uses for the panel.
    pub fn window_id(self) -> &'static str {
        match self {
            PanelId::About => "about-window",
            PanelId::Services => "services-window",
            PanelId::Contact => "contact-window",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.window_id())
    }
}

impl FromStr for PanelId {
    type Err = BackgroundError;

    /// Accepts both `about` and `about-window` forms.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = value.trim().to_ascii_lowercase();
        let key = key.strip_suffix("-window").unwrap_or(&key);
        match key {
            "about" => Ok(PanelId::About),
            "services" => Ok(PanelId::Services),
            "contact" => Ok(PanelId::Contact),
            _ => Err(BackgroundError::UnknownPanel(value.to_string())),
        }
    }
}

impl Serialize for PanelId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.window_id())
    }
}
