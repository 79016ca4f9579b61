use std::time::Duration;

use crate::message::Message;
use crate::sampler::{SampleError, Sampler};
use crate::system::ParseError;
use crate::system::collector::{Collect, list_value};

/// Installed physical memory in gibibytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacitySample {
    pub gib: u64,
}

/// Samples physical memory capacity from `key=value` collector output.
pub struct CapacitySampler<C> {
    collector: C,
    interval: Duration,
}

impl<C: Collect> CapacitySampler<C> {
    pub fn new(collector: C, interval: Duration) -> Self {
        Self {
            collector,
            interval,
        }
    }
}

impl<C: Collect> Sampler for CapacitySampler<C> {
    fn name(&self) -> &'static str {
        "maxcapacity"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn tick(&mut self) -> Result<Message, SampleError> {
        let output = self.collector.collect().await?;
        Ok(Message::MemoryCapacity(parse_capacity(&output)?))
    }
}

/// Extracts the `MaxCapacity` value, reported in kibibytes, and converts it
/// to whole gibibytes.
pub fn parse_capacity(output: &str) -> Result<CapacitySample, ParseError> {
    let value = list_value(output, "MaxCapacity").ok_or(ParseError::MissingKey("MaxCapacity"))?;
    let kib: u64 = value.parse().map_err(|_| ParseError::InvalidNumber {
        field: "MaxCapacity",
        value: value.to_string(),
    })?;
    Ok(CapacitySample {
        gib: kib / (1024 * 1024),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_kibibytes_to_whole_gibibytes() {
        let output = "MaxCapacity=16777216\r\nMemoryDevices=2\r\n";
        assert_eq!(parse_capacity(output).unwrap(), CapacitySample { gib: 16 });
    }

    #[test]
    fn division_truncates() {
        // 16 GiB plus change still reads as 16.
        let output = "MaxCapacity=16777217\n";
        assert_eq!(parse_capacity(output).unwrap(), CapacitySample { gib: 16 });
    }

    #[test]
    fn missing_key_is_a_parse_error() {
        assert_eq!(
            parse_capacity("MemoryDevices=2\n"),
            Err(ParseError::MissingKey("MaxCapacity"))
        );
    }
}
