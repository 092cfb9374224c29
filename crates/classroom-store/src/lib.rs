pub mod queries;
pub mod report;
pub mod seed;

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use tracing::info;

use classroom_types::models::{Announcement, AttendanceEvent, SharedFile};

pub use seed::Seed;

/// In-memory state for attendance, class files and announcements.
///
/// One lock guards everything. Readers get owned snapshots so nothing is
/// iterated, serialized or written to a socket while the lock is held.
pub struct Store {
    state: Mutex<State>,
}

pub(crate) struct State {
    pub(crate) attendance: Vec<AttendanceEvent>,
    pub(crate) files_by_class: HashMap<String, Vec<SharedFile>>,
    pub(crate) announcements: VecDeque<Announcement>,
    pub(crate) timetable: HashMap<String, u32>,
    last_at: Option<DateTime<Utc>>,
    last_stamp: String,
    stamp_seq: u32,
}

impl State {
    /// Server clock for a new record, never earlier than the previous one.
    pub(crate) fn now(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let at = match self.last_at {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_at = Some(at);
        at
    }

    /// 14-digit local timestamp id. Records stamped within the same second
    /// get a `-N` suffix.
    pub(crate) fn next_id(&mut self, at: DateTime<Utc>) -> String {
        let stamp = at.with_timezone(&Local).format("%Y%m%d%H%M%S").to_string();
        if stamp == self.last_stamp {
            self.stamp_seq += 1;
            format!("{}-{}", stamp, self.stamp_seq)
        } else {
            self.last_stamp = stamp.clone();
            self.stamp_seq = 0;
            stamp
        }
    }
}

impl Store {
    pub fn new(seed: Seed) -> Self {
        info!(
            "Store seeded with classes {:?} and {} timetable entries",
            seed.classes,
            seed.timetable.len()
        );

        let files_by_class = seed
            .classes
            .into_iter()
            .map(|class_id| (class_id, Vec::new()))
            .collect();

        Self {
            state: Mutex::new(State {
                attendance: Vec::new(),
                files_by_class,
                announcements: VecDeque::new(),
                timetable: seed.timetable,
                last_at: None,
                last_stamp: String::new(),
                stamp_seq: 0,
            }),
        }
    }

    pub(crate) fn with_state<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut State) -> T,
    {
        let mut state = self
            .state
            .lock()
            .map_err(|e| anyhow::anyhow!("Store lock poisoned: {}", e))?;
        Ok(f(&mut state))
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Seed::default())
    }
}
