use log::Level;
use std::fmt;

/// Logging handed to the handler for the duration of a single update, so
/// every line can be tied back to the update that caused it.
pub trait EventLog: Send + Sync {
    fn log(&self, level: Level, args: fmt::Arguments<'_>);

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args)
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args)
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args)
    }
}

/// Forwards to the `log` facade, prefixed with the update id
#[derive(Debug, Clone, Copy)]
pub struct UpdateLog {
    update_id: i64,
}

impl UpdateLog {
    pub const fn new(update_id: i64) -> UpdateLog {
        UpdateLog { update_id }
    }
}

impl EventLog for UpdateLog {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        log::log!(target: "linkbot::handler", level, "update {}: {}", self.update_id, args);
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    pub struct RecordingLog {
        records: Mutex<Vec<(Level, String)>>,
    }

    impl RecordingLog {
        pub fn records(&self) -> Vec<(Level, String)> {
            self.records.lock().unwrap().clone()
        }

        pub fn contains(&self, level: Level, needle: &str) -> bool {
            self.records()
                .iter()
                .any(|(l, line)| *l == level && line.contains(needle))
        }
    }

    impl EventLog for RecordingLog {
        fn log(&self, level: Level, args: fmt::Arguments<'_>) {
            self.records.lock().unwrap().push((level, args.to_string()));
        }
    }
}
