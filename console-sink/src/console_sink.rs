use fieldlog::entry::LogEntry;
use fieldlog::fields::Field;
use fieldlog::levels::Level;
use fieldlog::sink::LogSink;
use std::fmt::Write as _;

// Based on simple logger
#[cfg(feature = "colors")]
use colored::Colorize;

pub struct ConsoleSink {
    /// Control how timestamps are displayed.
    ///
    /// This field is only available if the `timestamps` feature is enabled.
    #[cfg(feature = "timestamps")]
    timestamps: bool,

    /// Whether to use color output or not.
    ///
    /// This field is only available if the `colors` feature is enabled.
    #[cfg(feature = "colors")]
    colors: bool,
}

impl ConsoleSink {
    /// Creates a new `ConsoleSink` with timestamps and colors on.
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "timestamps")]
            timestamps: true,
            #[cfg(feature = "colors")]
            colors: true,
        }
    }

    #[cfg(feature = "timestamps")]
    #[must_use]
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    #[cfg(feature = "colors")]
    #[must_use]
    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    fn level_string(&self, level: Level) -> String {
        #[cfg(feature = "colors")]
        {
            if self.colors {
                return match level {
                    Level::Fatal | Level::Alert | Level::Panic | Level::Error => {
                        level.to_string().red().to_string()
                    }
                    Level::Warn => level.to_string().yellow().to_string(),
                    Level::Notice | Level::Info => level.to_string().cyan().to_string(),
                    Level::Debug => level.to_string().purple().to_string(),
                    Level::Trace => level.to_string().normal().to_string(),
                };
            }
        }
        level.to_string()
    }

    fn format_entry(&self, entry: &LogEntry) -> String {
        let timestamp = {
            #[cfg(feature = "timestamps")]
            if self.timestamps {
                format!("{} ", chrono::Utc::now().to_rfc3339())
            } else {
                String::new()
            }

            #[cfg(not(feature = "timestamps"))]
            String::new()
        };

        let mut line = format!(
            "{timestamp}{:<6} {}",
            self.level_string(entry.level),
            entry.message
        );
        line.push_str(&format_fields(&entry.fields));
        line
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for ConsoleSink {
    fn on_startup(&self) {}
    fn on_shutdown(&self) {}

    fn on_log_enabled(&self, _: Level) -> bool {
        // reaching here we accept everything
        true
    }

    fn on_log(&self, entry: &LogEntry) {
        let message = self.format_entry(entry);

        #[cfg(not(feature = "stderr"))]
        println!("{message}");

        #[cfg(feature = "stderr")]
        eprintln!("{message}");
    }
}

/// Renders fields as ` key=value` pairs. A later duplicate key shadows an
/// earlier one here, at render time only; the entry's field set keeps every
/// occurrence.
fn format_fields(fields: &[Field]) -> String {
    let mut out = String::new();
    for (i, f) in fields.iter().enumerate() {
        let shadowed = fields[i + 1..].iter().any(|later| later.key == f.key);
        if shadowed {
            continue;
        }
        let _ = write!(out, " {}={}", f.key, f.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldlog::{CALLER_SKIP, field};

    fn plain_sink() -> ConsoleSink {
        #[allow(unused_mut)]
        let mut sink = ConsoleSink::new();
        #[cfg(feature = "colors")]
        {
            sink = sink.with_colors(false);
        }
        #[cfg(feature = "timestamps")]
        {
            sink = sink.with_timestamps(false);
        }
        sink
    }

    #[test]
    fn renders_level_message_and_fields() {
        let entry = LogEntry::new(
            Level::Info,
            String::from("request accepted"),
            vec![field("req", "r1"), field("attempt", 2)],
            CALLER_SKIP + 1,
        );
        assert_eq!(
            plain_sink().format_entry(&entry),
            "INFO   request accepted req=r1 attempt=2"
        );
    }

    #[test]
    fn pads_the_level_column() {
        let entry = LogEntry::new(Level::Notice, String::from("m"), Vec::new(), CALLER_SKIP);
        assert_eq!(plain_sink().format_entry(&entry), "NOTICE m");
    }

    #[test]
    fn later_duplicate_key_shadows_earlier_at_render_time() {
        let fields = vec![field("a", 1), field("b", 2), field("a", 3)];
        assert_eq!(format_fields(&fields), " b=2 a=3");
    }

    #[test]
    fn no_fields_renders_nothing_extra() {
        let entry = LogEntry::new(Level::Error, String::from("bad"), Vec::new(), CALLER_SKIP);
        assert_eq!(plain_sink().format_entry(&entry), "ERROR  bad");
    }
}
