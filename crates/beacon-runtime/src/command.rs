//! `setbeaconrange` command
//!
//! `/setbeaconrange <range>` sets the radius of the beacon the issuing player
//! is looking at and persists it as an override.

use thiserror::Error;
use tracing::{info, warn};

use beacon_core::{ActorId, Radius, MAX_RADIUS, MIN_RADIUS};
use beacon_registry::ProximityBroadcastRegistry;

use crate::{BlockTargeting, ConfigError, ConfigStore};

/// Command name, matched case-insensitively
pub const SET_RANGE_COMMAND: &str = "setbeaconrange";
/// How far a player may be from the beacon they target
pub const TARGET_REACH: u32 = 10;

/// Who issued a command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandSender {
    Player(ActorId),
    Console,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyKind {
    Success,
    Error,
}

/// Message sent back to the command issuer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandReply {
    pub kind: ReplyKind,
    pub message: String,
}

impl CommandReply {
    pub fn success(message: impl Into<String>) -> Self {
        CommandReply {
            kind: ReplyKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        CommandReply {
            kind: ReplyKind::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == ReplyKind::Success
    }
}

/// Result of dispatching a command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Handled(CommandReply),
    /// Not one of ours; the host should try other handlers
    Unhandled,
}

/// Why a range change was refused
#[derive(Error, Debug)]
pub enum SetRangeError {
    #[error("Only players can use this command!")]
    NotAPlayer,

    #[error("Usage: /setbeaconrange <range>")]
    Usage,

    #[error("Invalid number format!")]
    InvalidNumber,

    #[error("Range must be between {} and {}!", MIN_RADIUS, MAX_RADIUS)]
    OutOfRange,

    #[error("You must be looking at a beacon!")]
    NotLookingAtBeacon,

    #[error("Failed to save beacon range: {0}")]
    Persist(#[from] ConfigError),
}

/// Run `setbeaconrange` and build the reply
pub fn set_range<T>(
    sender: &CommandSender,
    args: &[&str],
    targeting: &T,
    registry: &ProximityBroadcastRegistry,
    store: &ConfigStore,
) -> CommandReply
where
    T: BlockTargeting + ?Sized,
{
    match try_set_range(sender, args, targeting, registry, store) {
        Ok(radius) => CommandReply::success(format!("Beacon range set to {radius} blocks!")),
        Err(e) => CommandReply::error(e.to_string()),
    }
}

fn try_set_range<T>(
    sender: &CommandSender,
    args: &[&str],
    targeting: &T,
    registry: &ProximityBroadcastRegistry,
    store: &ConfigStore,
) -> Result<Radius, SetRangeError>
where
    T: BlockTargeting + ?Sized,
{
    let CommandSender::Player(actor) = *sender else {
        return Err(SetRangeError::NotAPlayer);
    };

    let [arg] = args else {
        return Err(SetRangeError::Usage);
    };

    let range = arg
        .parse::<i32>()
        .map_err(|_| SetRangeError::InvalidNumber)?;
    let radius = Radius::new(i64::from(range)).map_err(|_| SetRangeError::OutOfRange)?;

    let target = targeting
        .targeted_block(actor, TARGET_REACH)
        .filter(|block| block.kind.is_beacon())
        .ok_or(SetRangeError::NotLookingAtBeacon)?;

    registry
        .register(target.position.clone(), radius.get())
        .map_err(|_| SetRangeError::OutOfRange)?;

    if let Err(e) = store.set_beacon_range(&target.position, radius) {
        warn!(anchor = %target.position, error = %e, "failed to persist beacon range");
        return Err(e.into());
    }

    info!(%actor, anchor = %target.position, %radius, "beacon range set");
    Ok(radius)
}
