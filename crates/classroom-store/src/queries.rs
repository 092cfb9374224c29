use anyhow::Result;
use tracing::debug;

use classroom_types::api::AttendanceReport;
use classroom_types::models::{Announcement, AttendanceEvent, AttendanceKind, SharedFile};

use crate::Store;
use crate::report::summarize;

/// Fields of a [`SharedFile`] supplied by the uploader. The store assigns `id` and `at`.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub teacher_id: String,
    pub name: String,
    pub url: String,
}

impl Store {
    // -- Attendance --

    pub fn append_attendance(&self, teacher_id: &str, kind: AttendanceKind) -> Result<AttendanceEvent> {
        self.with_state(|state| {
            let event = AttendanceEvent {
                teacher_id: teacher_id.to_string(),
                kind,
                at: state.now(),
            };
            state.attendance.push(event.clone());
            debug!("Recorded {:?} for {} ({} total)", kind, teacher_id, state.attendance.len());
            event
        })
    }

    pub fn list_attendance(&self) -> Result<Vec<AttendanceEvent>> {
        self.with_state(|state| state.attendance.clone())
    }

    pub fn expected_hours(&self, teacher_id: &str) -> Result<u32> {
        self.with_state(|state| state.timetable.get(teacher_id).copied().unwrap_or(0))
    }

    /// Report computed under a single lock acquisition so the counts and
    /// `events_recorded` describe the same moment.
    pub fn attendance_report(&self, teacher_id: &str) -> Result<AttendanceReport> {
        self.with_state(|state| {
            let expected = state.timetable.get(teacher_id).copied().unwrap_or(0);
            summarize(&state.attendance, teacher_id, expected)
        })
    }

    // -- Files --

    /// Files of one class in insertion order. Unknown classes yield an empty list.
    pub fn list_files(&self, class_id: &str) -> Result<Vec<SharedFile>> {
        self.with_state(|state| state.files_by_class.get(class_id).cloned().unwrap_or_default())
    }

    /// Append to the class's list, creating it on first write.
    pub fn append_file(&self, class_id: &str, file: NewFile) -> Result<SharedFile> {
        self.with_state(|state| {
            let at = state.now();
            let shared = SharedFile {
                id: state.next_id(at),
                class_id: class_id.to_string(),
                teacher_id: file.teacher_id,
                name: file.name,
                url: file.url,
                at,
            };
            state
                .files_by_class
                .entry(class_id.to_string())
                .or_default()
                .push(shared.clone());
            debug!("Stored file {} in class {}", shared.id, class_id);
            shared
        })
    }

    // -- Announcements --

    /// Insert at the head so the newest announcement comes first.
    pub fn prepend_announcement(&self, message: &str) -> Result<Announcement> {
        self.with_state(|state| {
            let at = state.now();
            let announcement = Announcement {
                id: state.next_id(at),
                message: message.to_string(),
                at,
            };
            state.announcements.push_front(announcement.clone());
            announcement
        })
    }

    pub fn list_announcements(&self) -> Result<Vec<Announcement>> {
        self.with_state(|state| state.announcements.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::Seed;

    fn file(name: &str) -> NewFile {
        NewFile {
            teacher_id: "teacher-1".into(),
            name: name.into(),
            url: format!("http://example.org/{}", name),
        }
    }

    #[test]
    fn attendance_appends_in_order() {
        let store = Store::default();
        let first = store.append_attendance("teacher-1", AttendanceKind::Start).unwrap();
        let second = store.append_attendance("teacher-1", AttendanceKind::End).unwrap();

        let log = store.list_attendance().unwrap();
        assert_eq!(log, vec![first.clone(), second.clone()]);
        assert!(second.at >= first.at);
    }

    #[test]
    fn snapshots_are_independent() {
        let store = Store::default();
        store.append_attendance("teacher-1", AttendanceKind::Start).unwrap();

        let snapshot = store.list_attendance().unwrap();
        store.append_attendance("teacher-1", AttendanceKind::End).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.list_attendance().unwrap().len(), 2);
    }

    #[test]
    fn seeded_classes_start_empty() {
        let store = Store::default();
        assert!(store.list_files("L3").unwrap().is_empty());
        assert!(store.list_files("M1").unwrap().is_empty());
        assert!(store.list_files("UNKNOWN").unwrap().is_empty());
    }

    #[test]
    fn unseeded_class_is_created_on_first_write() {
        let store = Store::default();
        let stored = store.append_file("Z9", file("notes.pdf")).unwrap();

        assert_eq!(stored.class_id, "Z9");
        assert_eq!(store.list_files("Z9").unwrap(), vec![stored]);
        assert!(store.list_files("L3").unwrap().is_empty());
    }

    #[test]
    fn ids_are_unique_within_a_second() {
        let store = Store::default();
        let a = store.append_file("L3", file("a.pdf")).unwrap();
        let b = store.append_file("L3", file("b.pdf")).unwrap();
        let c = store.prepend_announcement("hello").unwrap();

        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert!(a.id.len() >= 14);
        assert!(a.id[..14].chars().all(|ch| ch.is_ascii_digit()));
    }

    #[test]
    fn announcements_are_newest_first() {
        let store = Store::default();
        store.prepend_announcement("first").unwrap();
        let latest = store.prepend_announcement("second").unwrap();

        let list = store.list_announcements().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], latest);
        assert_eq!(list[1].message, "first");
    }

    #[test]
    fn expected_hours_defaults_to_zero() {
        let store = Store::default();
        assert_eq!(store.expected_hours("teacher-1").unwrap(), 6);
        assert_eq!(store.expected_hours("nobody").unwrap(), 0);
    }

    #[test]
    fn custom_seed_is_respected() {
        let store = Store::new(Seed {
            classes: vec!["A1".into()],
            timetable: HashMap::from([("t".to_string(), 4)]),
        });
        assert_eq!(store.expected_hours("t").unwrap(), 4);
        assert_eq!(store.expected_hours("teacher-1").unwrap(), 0);

        store.append_attendance("t", AttendanceKind::Start).unwrap();
        store.append_attendance("t", AttendanceKind::End).unwrap();
        let report = store.attendance_report("t").unwrap();
        assert_eq!(report.worked_hours, 2);
        assert_eq!(report.missing_hours, 2);
    }

    #[test]
    fn concurrent_appends_are_all_recorded() {
        let store = Arc::new(Store::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        store.append_attendance("teacher-1", AttendanceKind::Start).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let log = store.list_attendance().unwrap();
        assert_eq!(log.len(), 400);
        assert!(log.windows(2).all(|w| w[0].at <= w[1].at));
        assert_eq!(store.attendance_report("teacher-1").unwrap().events_recorded, 400);
    }
}
