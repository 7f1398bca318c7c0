//! Closed vocabulary of sidebar icon names.
//!
//! Icon names arrive as free-form frontmatter strings but resolve to a fixed
//! enum here, so a typo in a content file fails the scan instead of silently
//! rendering nothing. The variant set tracks the icons the site's navigation
//! actually renders; extending it is a one-line change plus a renderer arm.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("unknown icon name '{0}' (known: {known})", known = KNOWN_ICON_NAMES.join(", "))]
pub struct UnknownIcon(pub String);

/// Icon displayed next to a sidebar entry or section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Book,
    Rocket,
    Wrench,
    Terminal,
    Shield,
    Globe,
    Sparkles,
    FileText,
    Folder,
    CircleHelp,
}

/// All accepted frontmatter spellings, in declaration order.
pub const KNOWN_ICON_NAMES: &[&str] = &[
    "book",
    "rocket",
    "wrench",
    "terminal",
    "shield",
    "globe",
    "sparkles",
    "file-text",
    "folder",
    "circle-help",
];

impl Icon {
    /// The kebab-case name used in frontmatter and emitted artifacts.
    pub fn name(self) -> &'static str {
        match self {
            Icon::Book => "book",
            Icon::Rocket => "rocket",
            Icon::Wrench => "wrench",
            Icon::Terminal => "terminal",
            Icon::Shield => "shield",
            Icon::Globe => "globe",
            Icon::Sparkles => "sparkles",
            Icon::FileText => "file-text",
            Icon::Folder => "folder",
            Icon::CircleHelp => "circle-help",
        }
    }
}

impl FromStr for Icon {
    type Err = UnknownIcon;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "book" => Ok(Icon::Book),
            "rocket" => Ok(Icon::Rocket),
            "wrench" => Ok(Icon::Wrench),
            "terminal" => Ok(Icon::Terminal),
            "shield" => Ok(Icon::Shield),
            "globe" => Ok(Icon::Globe),
            "sparkles" => Ok(Icon::Sparkles),
            "file-text" => Ok(Icon::FileText),
            "folder" => Ok(Icon::Folder),
            "circle-help" => Ok(Icon::CircleHelp),
            other => Err(UnknownIcon(other.to_string())),
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
