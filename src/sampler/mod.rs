pub mod capacity;
pub mod load;
pub mod tasklist;

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::message::{MailboxSender, Message};
use crate::system::ParseError;
use crate::system::collector::CollectorError;

/// How often a sampler wakes to check its interval and the stop token.
/// Bounds shutdown latency independently of the sampling interval.
const STOP_POLL: Duration = Duration::from_millis(100);

/// A periodic sample producer. The driver in [`run`] owns the schedule; a
/// sampler only knows how to produce one message per tick.
pub trait Sampler: Send {
    fn name(&self) -> &'static str;

    fn interval(&self) -> Duration;

    fn tick(&mut self) -> impl Future<Output = Result<Message, SampleError>> + Send;
}

/// Why a tick published nothing. Either way the sampler stays on schedule
/// and retries at its next tick.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error(transparent)]
    Collector(#[from] CollectorError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Spawns a sampler onto the runtime. The task runs until `stop` is
/// cancelled or the mailbox closes.
pub fn spawn<S>(sampler: S, tx: MailboxSender, stop: CancellationToken) -> JoinHandle<()>
where
    S: Sampler + 'static,
{
    tokio::spawn(run(sampler, tx, stop))
}

/// Drives one sampler: ticks once the interval has elapsed, publishes on
/// success, logs and skips on failure. The stop token is observed at every
/// short sleep; an in-flight tick is allowed to finish after a stop request.
async fn run<S: Sampler>(mut sampler: S, tx: MailboxSender, stop: CancellationToken) {
    let mut last_tick = Instant::now();
    while !stop.is_cancelled() {
        if last_tick.elapsed() >= sampler.interval() {
            last_tick = Instant::now();
            match sampler.tick().await {
                Ok(message) => {
                    if tx.send(message).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!(sampler = sampler.name(), %error, "tick skipped");
                }
            }
        }
        tokio::select! {
            () = stop.cancelled() => break,
            () = tokio::time::sleep(STOP_POLL) => {}
        }
    }
}
