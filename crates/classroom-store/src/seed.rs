use std::collections::HashMap;

/// Class ids whose file lists exist before any upload.
pub const DEFAULT_CLASSES: [&str; 2] = ["L3", "M1"];

/// Expected hours per teacher.
pub const DEFAULT_TIMETABLE: [(&str, u32); 1] = [("teacher-1", 6)];

/// Initial contents of the store. The timetable is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub classes: Vec<String>,
    pub timetable: HashMap<String, u32>,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            classes: DEFAULT_CLASSES.iter().map(|c| c.to_string()).collect(),
            timetable: DEFAULT_TIMETABLE
                .iter()
                .map(|(teacher, hours)| (teacher.to_string(), *hours))
                .collect(),
        }
    }
}
