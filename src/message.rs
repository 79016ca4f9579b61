use tokio::sync::mpsc;

use crate::sampler::capacity::CapacitySample;
use crate::sampler::load::LoadSample;
use crate::system::process::Snapshot;

/// One tagged sample traveling from a sampler to the renderer. The channel
/// preserves each producer's publish order; ordering across producers is
/// immaterial because the consumer overwrites per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Tasklist(Snapshot),
    LoadPercentage(LoadSample),
    MemoryCapacity(CapacitySample),
}

/// Sending half handed to every sampler. Sends never block.
pub type MailboxSender = mpsc::UnboundedSender<Message>;

/// Receiving half owned by the render loop.
pub type Mailbox = mpsc::UnboundedReceiver<Message>;

/// Creates the sampler-to-renderer channel, the only structure shared
/// between the sampler tasks and the render loop.
pub fn mailbox() -> (MailboxSender, Mailbox) {
    mpsc::unbounded_channel()
}
