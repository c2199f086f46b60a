use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use uuid::Uuid;

const INSTANCE_TAG_LEN: usize = 8;

/// Time-based id source: `<millisecond epoch>-<instance tag>`.
///
/// The millisecond part is strictly increasing within one generator even when
/// several ids are drawn in the same millisecond. The tag is random per
/// generator, so two clients minting in the same millisecond still differ.
#[derive(Debug)]
pub struct IdGenerator {
    last: AtomicI64,
    instance: String,
}

impl IdGenerator {
    pub fn new() -> Self {
        let mut instance = Uuid::new_v4().simple().to_string();
        instance.truncate(INSTANCE_TAG_LEN);
        Self {
            last: AtomicI64::new(0),
            instance,
        }
    }

    pub fn instance_tag(&self) -> &str {
        &self.instance
    }

    pub fn next_id(&self) -> String {
        format!("{}-{}", self.next_millis(), self.instance)
    }

    fn next_millis(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut previous = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(previous + 1);
            match self.last.compare_exchange_weak(
                previous,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => previous = actual,
            }
        }
    }

    /// Draws ids until one is not taken.
    pub fn next_unused(&self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = self.next_id();
            if !taken(&id) {
                return id;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
