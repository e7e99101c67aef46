//! Configuration tiers

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One precedence level of configuration, or the virtual aggregate [`Tier::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Read-only defaults shipped with the program
    Default,
    /// Per-user settings
    User,
    /// Machine-wide settings
    Global,
    /// Search user, then global, then default
    #[default]
    All,
}

impl Tier {
    /// Concrete tiers in precedence order, highest first
    pub const PRECEDENCE: [Tier; 3] = [Tier::User, Tier::Global, Tier::Default];

    /// Concrete tiers searched for this selector, in order.
    pub fn search_order(self) -> &'static [Tier] {
        match self {
            Tier::User => &[Tier::User],
            Tier::Global => &[Tier::Global],
            Tier::Default => &[Tier::Default],
            Tier::All => &Self::PRECEDENCE,
        }
    }

    /// Whether `store` may target this tier
    pub fn is_writable(self) -> bool {
        matches!(self, Tier::User | Tier::Global)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Default => "default",
            Tier::User => "user",
            Tier::Global => "global",
            Tier::All => "all",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(Tier::Default),
            "user" => Ok(Tier::User),
            "global" => Ok(Tier::Global),
            "all" => Ok(Tier::All),
            other => Err(Error::InvalidArgument(format!(
                "unknown tier '{other}' (expected default, user, global or all)"
            ))),
        }
    }
}
