//! Driver-station style telemetry.
//!
//! Callers buffer caption/value lines during a loop and call
//! [`Telemetry::update`] once at the end. The buffer is published at most once
//! per transmission interval and is always cleared, so the published frame
//! only ever holds the most recent loop's values.

use std::fmt::Display;

use crate::library::seconds;

const CAPTION_SEPARATOR: &str = ": ";

#[derive(Clone, Debug)]
pub struct Telemetry {
    pending: Vec<String>,
    published: Vec<String>,
    /// Seconds between publications
    interval: f64,
    last_publish: f64,
}

impl Default for Telemetry {
    fn default() -> Self {
        Telemetry {
            pending: Vec::new(),
            published: Vec::new(),
            interval: seconds(600.0),
            last_publish: f64::NEG_INFINITY,
        }
    }
}

impl Telemetry {
    pub fn new() -> Telemetry {
        Telemetry::default()
    }

    pub fn add_data<T: Display>(&mut self, caption: &str, value: T) {
        self.pending.push(format!("{caption}{CAPTION_SEPARATOR}{value}"));
    }

    pub fn add_line(&mut self, line: &str) {
        self.pending.push(line.to_string());
    }

    pub fn set_transmission_interval(&mut self, ms: f64) {
        self.interval = seconds(ms);
    }

    /// Publishes the buffered lines if the interval has passed since the
    /// last publication, then clears the buffer. Returns whether it published.
    pub fn update(&mut self, timestamp: f64) -> bool {
        let due = timestamp - self.last_publish >= self.interval;
        if due {
            self.published = std::mem::take(&mut self.pending);
            self.last_publish = timestamp;
            log::trace!("telemetry published {} lines at {timestamp:.3}s", self.published.len());
        } else {
            self.pending.clear();
        }
        due
    }

    /// Publishes immediately, ignoring the interval.
    pub fn dump(&mut self, timestamp: f64) {
        self.published = std::mem::take(&mut self.pending);
        self.last_publish = timestamp;
    }

    pub fn published(&self) -> &[String] {
        &self.published
    }
}
