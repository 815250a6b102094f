// Telemetry data domain models
use std::collections::VecDeque;
use std::fmt;

/// Number of samples kept on the telemetry chart.
pub const WINDOW_CAPACITY: usize = 20;

const WARNING_ABOVE: f64 = 85.0;
const CRITICAL_ABOVE: f64 = 95.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySample {
    pub time: String,
    pub value: f64,
}

impl TelemetrySample {
    #[cfg(test)]
    pub fn new(time: String, value: f64) -> Self {
        Self { time, value }
    }

    /// Sample stamped with the local wall-clock time, `HH:MM:SS`.
    pub fn now(value: f64) -> Self {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        Self { time, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Safe,
    Warning,
    Critical,
}

impl Severity {
    pub fn classify(value: f64) -> Self {
        if value > CRITICAL_ABOVE {
            Severity::Critical
        } else if value > WARNING_ABOVE {
            Severity::Warning
        } else {
            Severity::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Safe => "SAFE",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity and displayed anomaly score derived from one sample value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub severity: Severity,
    pub score: u32,
}

impl Assessment {
    pub fn of(value: f64) -> Self {
        let severity = Severity::classify(value);
        let score = match severity {
            Severity::Safe => (value / 4.0).floor(),
            _ => value.floor(),
        };
        Self {
            severity,
            score: score.max(0.0) as u32,
        }
    }
}

/// Bounded FIFO of the most recent samples.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: VecDeque<TelemetrySample>,
    capacity: usize,
}

impl SampleWindow {
    /// Capacity is at least one sample.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: TelemetrySample) {
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&TelemetrySample> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TelemetrySample> {
        self.samples.iter()
    }
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new(WINDOW_CAPACITY)
    }
}
