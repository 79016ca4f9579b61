use std::time::Duration;

use crate::message::Message;
use crate::sampler::{SampleError, Sampler};
use crate::system::ParseError;
use crate::system::collector::{Collect, list_value};

/// Overall processor load as reported by the collector, in percent.
/// The value is trusted as-is; nothing clamps it to 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSample {
    pub percent: u32,
}

/// Samples processor load from `key=value` collector output.
pub struct LoadSampler<C> {
    collector: C,
    interval: Duration,
}

impl<C: Collect> LoadSampler<C> {
    pub fn new(collector: C, interval: Duration) -> Self {
        Self {
            collector,
            interval,
        }
    }
}

impl<C: Collect> Sampler for LoadSampler<C> {
    fn name(&self) -> &'static str {
        "loadpercentage"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn tick(&mut self) -> Result<Message, SampleError> {
        let output = self.collector.collect().await?;
        Ok(Message::LoadPercentage(parse_load(&output)?))
    }
}

/// Extracts the `LoadPercentage` value from list-format output.
pub fn parse_load(output: &str) -> Result<LoadSample, ParseError> {
    let value = list_value(output, "LoadPercentage")
        .ok_or(ParseError::MissingKey("LoadPercentage"))?;
    let percent = value.parse().map_err(|_| ParseError::InvalidNumber {
        field: "LoadPercentage",
        value: value.to_string(),
    })?;
    Ok(LoadSample { percent })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_load_percentage_key() {
        let output = "Architecture=9\r\nLoadPercentage=37\r\nName=Intel\r\n";
        assert_eq!(parse_load(output).unwrap(), LoadSample { percent: 37 });
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let output = "LoadPercentage=140\n";
        assert_eq!(parse_load(output).unwrap(), LoadSample { percent: 140 });
    }

    #[test]
    fn missing_key_is_a_parse_error() {
        assert_eq!(
            parse_load("Architecture=9\n"),
            Err(ParseError::MissingKey("LoadPercentage"))
        );
    }

    #[test]
    fn non_numeric_value_is_a_parse_error() {
        assert_eq!(
            parse_load("LoadPercentage=high\n"),
            Err(ParseError::InvalidNumber {
                field: "LoadPercentage",
                value: "high".to_string(),
            })
        );
    }
}
