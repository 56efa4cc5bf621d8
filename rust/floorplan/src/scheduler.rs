// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Debounced room detection.
//!
//! Every wall/corner edit calls [`RoomDetectionScheduler::notify_graph_changed`],
//! which replaces any pending timer. The host loop polls once per frame with
//! the current snapshot; detection runs once the quiet period has elapsed
//! without a newer edit. Time is supplied by the caller.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::config::DetectionConfig;
use crate::coords::CoordinateConverter;
use crate::reconcile::reconcile_rooms;
use crate::room_detector::detect_rooms;
use crate::types::{Corner, Room, Wall};

/// Identifies one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Single-slot cancellable timer
#[derive(Debug)]
pub struct DebounceTimer {
    quiet_period: Duration,
    next_handle: u64,
    pending: Option<(TimerHandle, Instant)>,
}

impl DebounceTimer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            next_handle: 0,
            pending: None,
        }
    }

    /// Schedule a fire at `now + quiet_period`, replacing any pending timer.
    pub fn schedule(&mut self, now: Instant) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        if let Some((old, _)) = self.pending.replace((handle, now + self.quiet_period)) {
            trace!(?old, ?handle, "superseded pending timer");
        }
        handle
    }

    /// Cancel the pending timer; returns whether one was pending
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, at)| at)
    }

    /// Fire the pending timer if its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<TimerHandle> {
        match self.pending {
            Some((handle, at)) if now >= at => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }
}

/// Owns the current room set and re-detects after edits settle
#[derive(Debug)]
pub struct RoomDetectionScheduler {
    timer: DebounceTimer,
    converter: CoordinateConverter,
    config: DetectionConfig,
    rooms: Vec<Room>,
}

impl RoomDetectionScheduler {
    pub fn new(converter: CoordinateConverter, config: DetectionConfig) -> Self {
        Self {
            timer: DebounceTimer::new(Duration::from_millis(config.debounce_ms)),
            converter,
            config,
            rooms: Vec::new(),
        }
    }

    pub fn notify_graph_changed(&mut self, now: Instant) -> TimerHandle {
        self.timer.schedule(now)
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Run detection if the quiet period has elapsed. Returns the new room
    /// set when it ran.
    pub fn poll(&mut self, now: Instant, corners: &[Corner], walls: &[Wall]) -> Option<&[Room]> {
        self.timer.poll(now)?;
        self.run(corners, walls);
        Some(self.rooms.as_slice())
    }

    /// Run detection now, dropping any pending timer
    pub fn flush(&mut self, corners: &[Corner], walls: &[Wall]) -> &[Room] {
        self.timer.cancel();
        self.run(corners, walls);
        &self.rooms
    }

    fn run(&mut self, corners: &[Corner], walls: &[Wall]) {
        let detected = detect_rooms(corners, walls, &self.converter, &self.config);
        self.rooms = reconcile_rooms(&self.rooms, detected, &self.converter, &self.config);
        debug!(rooms = self.rooms.len(), "rooms re-detected");
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Seed the current set, e.g. from a saved plan
    pub fn set_rooms(&mut self, rooms: Vec<Room>) {
        self.rooms = rooms;
    }

    /// Rename or retype a room; returns false when the id is unknown
    pub fn update_room_metadata(&mut self, room_id: &str, name: &str, room_type: &str) -> bool {
        match self.rooms.iter_mut().find(|r| r.id == room_id) {
            Some(room) => {
                room.name = name.to_string();
                room.room_type = room_type.to_string();
                true
            }
            None => false,
        }
    }
}
