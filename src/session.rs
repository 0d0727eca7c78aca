//! Session-scoped state.
//!
//! The only value that outlives a recomputation is the point last clicked on
//! the scale map. It lives in a [`SessionContext`], one per session, kept in a
//! [`SessionStore`] from session start until session end.

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};

use crate::common::types::*;


#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Map click payload; the first point is the one clicked
pub struct ClickEvent {
    pub points: Vec<GeoPoint>,
}

impl ClickEvent {
    pub fn at(point: GeoPoint) -> Self {
        ClickEvent {points: vec![point]}
    }

    pub fn point(&self) -> Option<GeoPoint> {
        self.points.first().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Outcome of capturing a click on the scale map
pub enum StateUpdate {
    /// Store the clicked point
    Replace(GeoPoint),
    /// The event carried no point, keep what is stored
    Retain,
}

impl StateUpdate {
    pub fn from_click(click: Option<&ClickEvent>) -> Self {
        match click.and_then(|c| c.point()) {
            Some(p) => StateUpdate::Replace(p),
            None => StateUpdate::Retain,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Per-session state
pub struct SessionContext {
    map_center: Option<GeoPoint>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last clicked point on the scale map, if any
    pub fn map_center(&self) -> Option<GeoPoint> {
        self.map_center
    }

    /// Applies an update, last write wins
    pub fn apply(&mut self, update: StateUpdate) -> &mut Self {
        if let StateUpdate::Replace(p) = update {
            self.map_center = Some(p);
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

#[derive(Debug, Default)]
/// Session-keyed store of contexts
pub struct SessionStore {
    sessions: HashMap<SessionId, SessionContext>,
    next_id: u64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session with a fresh context
    pub fn open(&mut self) -> SessionId {
        let id = SessionId(self.next_id);
        self.next_id += 1;
        self.sessions.insert(id, SessionContext::new());
        tracing::debug!(%id, "session opened");
        id
    }

    /// Context of a session, started afresh if it is not in the store
    pub fn context_mut(&mut self, id: SessionId) -> &mut SessionContext {
        self.sessions.entry(id).or_default()
    }

    /// Ends a session and drops its context
    pub fn close(&mut self, id: SessionId) -> Option<SessionContext> {
        let ctx = self.sessions.remove(&id);
        if ctx.is_some() {
            tracing::debug!(%id, "session closed");
        }
        ctx
    }
}

#[cfg(test)]
impl SessionStore {
    pub fn get(&self, id: SessionId) -> Option<&SessionContext> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut SessionContext> {
        self.sessions.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
