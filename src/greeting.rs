//! # Greeting Helpers
//!
//! The smallest piece of every assignment: building a greeting for a subject
//! and writing it to a log sink.
//!
//! ```rust
//! use xr_scenes::greeting::create_hello_message;
//!
//! assert_eq!(create_hello_message("XR"), "Hello, XR!");
//! ```

use std::io::{self, Write};

/// Builds `"Hello, <subject>!"`.
///
/// The subject is used as-is, so an empty subject yields `"Hello, !"`.
pub fn create_hello_message(subject: &str) -> String {
    format!("Hello, {}!", subject)
}

/// Logs the greeting for `subject` as a single `info` record.
pub fn say_hello(subject: &str) {
    log::info!("{}", create_hello_message(subject));
}

/// Writes the greeting for `subject` to `sink`, terminated by one newline.
pub fn say_hello_to<W: Write>(sink: &mut W, subject: &str) -> io::Result<()> {
    writeln!(sink, "{}", create_hello_message(subject))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    struct CaptureLogger {
        lines: Mutex<Vec<String>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    fn capture_logger() -> &'static CaptureLogger {
        static LOGGER: OnceLock<CaptureLogger> = OnceLock::new();
        let logger = LOGGER.get_or_init(|| CaptureLogger {
            lines: Mutex::new(Vec::new()),
        });
        if log::set_logger(logger).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
        logger
    }

    #[test]
    fn test_message_format() {
        assert_eq!(create_hello_message("XR"), "Hello, XR!");
        assert_eq!(create_hello_message("World"), "Hello, World!");
        assert_eq!(create_hello_message("a b  c"), "Hello, a b  c!");
    }

    #[test]
    fn test_empty_subject_is_concatenated() {
        assert_eq!(create_hello_message(""), "Hello, !");
    }

    #[test]
    fn test_say_hello_to_writes_one_line() {
        let mut sink = Vec::new();
        say_hello_to(&mut sink, "students").unwrap();

        let written = String::from_utf8(sink).unwrap();
        assert_eq!(written, "Hello, students!\n");
        assert_eq!(written.lines().count(), 1);
    }

    #[test]
    fn test_say_hello_logs_exactly_one_record() {
        let logger = capture_logger();
        let subject = "greeting-capture-subject";
        let expected = create_hello_message(subject);

        say_hello(subject);

        let lines = logger.lines.lock().unwrap();
        let matching = lines.iter().filter(|line| **line == expected).count();
        assert_eq!(matching, 1);
    }
}
