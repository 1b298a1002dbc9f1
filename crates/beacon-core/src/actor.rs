//! Actors - moving entities eligible to receive effects

use crate::{ActorId, ActorPos};

/// Actor snapshot as reported by the host at locate time
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub id: ActorId,
    pub position: ActorPos,
}

impl Actor {
    pub fn new(id: ActorId, position: ActorPos) -> Self {
        Actor { id, position }
    }
}
