/// outcome notifications for work the user did not directly await.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// a reconciliation run finished, having appended `added` remote-only
    /// quotes. fires even when nothing was new.
    SyncCompleted { added: usize },
    /// a reconciliation run failed. the durable snapshot was not touched by
    /// the failing step.
    SyncFailed { reason: String },
    /// the detached publish of a locally added quote went through.
    QuotePublished { text: String },
    /// the detached publish failed. the quote stays local.
    PublishFailed { text: String, reason: String },
}
