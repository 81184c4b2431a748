use std::fmt;

use serde::{Deserialize, Serialize};

/// Last known backend liveness.
///
/// Advisory only: it is shown to the user and updated opportunistically by
/// probes and request outcomes, but it never gates a phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendStatus {
    Online,
    #[default]
    Offline,
}

impl BackendStatus {
    pub fn is_online(self) -> bool {
        self == Self::Online
    }
}

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "Online"),
            Self::Offline => write!(f, "Offline"),
        }
    }
}
