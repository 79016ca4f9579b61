use std::time::Duration;

use crate::message::Message;
use crate::sampler::{SampleError, Sampler};
use crate::system::collector::Collect;
use crate::system::process::Snapshot;

/// Samples the process table: parses the collector's CSV output, derives
/// each record's share of total processor time, and optionally sorts by
/// memory usage.
pub struct TasklistSampler<C> {
    collector: C,
    interval: Duration,
    sort_by_memory: bool,
}

impl<C: Collect> TasklistSampler<C> {
    pub fn new(collector: C, interval: Duration, sort_by_memory: bool) -> Self {
        Self {
            collector,
            interval,
            sort_by_memory,
        }
    }
}

impl<C: Collect> Sampler for TasklistSampler<C> {
    fn name(&self) -> &'static str {
        "tasklist"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn tick(&mut self) -> Result<Message, SampleError> {
        let output = self.collector.collect().await?;
        let mut snapshot = Snapshot::parse(&output)?;
        snapshot.assign_cpu_shares();
        if self.sort_by_memory {
            snapshot.sort_by_memory();
        }
        Ok(Message::Tasklist(snapshot))
    }
}
