use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle verb accepted by `one.vm.action`.
///
/// No client-side check is made that the verb is legal for the VM's current
/// state: the daemon owns the state machine and rejects illegal transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleAction {
    Terminate,
    TerminateHard,
    Reboot,
    RebootHard,
    Poweroff,
    PoweroffHard,
    Resume,
    Suspend,
    Undeploy,
    UndeployHard,
}

impl LifecycleAction {
    pub const ALL: [Self; 10] = [
        Self::Terminate,
        Self::TerminateHard,
        Self::Reboot,
        Self::RebootHard,
        Self::Poweroff,
        Self::PoweroffHard,
        Self::Resume,
        Self::Suspend,
        Self::Undeploy,
        Self::UndeployHard,
    ];

    /// Exact string sent on the wire.
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Terminate => "terminate",
            Self::TerminateHard => "terminate-hard",
            Self::Reboot => "reboot",
            Self::RebootHard => "reboot-hard",
            Self::Poweroff => "poweroff",
            Self::PoweroffHard => "poweroff-hard",
            Self::Resume => "resume",
            Self::Suspend => "suspend",
            Self::Undeploy => "undeploy",
            Self::UndeployHard => "undeploy-hard",
        }
    }

    /// The `-hard` counterpart, if the verb has one.
    #[must_use]
    pub const fn hard(self) -> Option<Self> {
        match self {
            Self::Terminate | Self::TerminateHard => Some(Self::TerminateHard),
            Self::Reboot | Self::RebootHard => Some(Self::RebootHard),
            Self::Poweroff | Self::PoweroffHard => Some(Self::PoweroffHard),
            Self::Undeploy | Self::UndeployHard => Some(Self::UndeployHard),
            Self::Resume | Self::Suspend => None,
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown lifecycle action '{0}'")]
pub struct ParseActionError(pub String);

impl FromStr for LifecycleAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_wire() == s)
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}
