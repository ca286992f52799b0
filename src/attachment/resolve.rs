//! Channel boundary for asynchronous content resolution.
//!
//! ```text
//! Storage thread                       Delegate (any thread)
//! --------------                       ---------------------
//! request_image(on_success, on_failure) ─────▶
//!                                        fetch bytes
//!                       ◀───────────── on_success(image) / on_failure()
//! process_resolutions()
//!   apply to attachments still present
//! ```
//!
//! Continuations only post messages; nothing touches the runs until the
//! storage drains the queue on its own thread.

use crate::attachment::{FailureCallback, Image, ImageCallback};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

/// Result of one content request.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ResolutionOutcome {
    Loaded(Image),
    Failed,
}

/// A finished request, tagged with the ticket it was issued under.
#[derive(Debug)]
pub(crate) struct ResolutionMessage {
    pub ticket: u64,
    pub outcome: ResolutionOutcome,
}

/// Message queue shared between continuations and the storage.
#[derive(Debug)]
pub(crate) struct ResolutionQueue {
    sender: Sender<ResolutionMessage>,
    receiver: Receiver<ResolutionMessage>,
    next_ticket: u64,
}

impl ResolutionQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            next_ticket: 0,
        }
    }

    /// Issue a ticket and the success/failure pair that reports on it.
    ///
    /// Only the first continuation invoked is delivered.
    pub fn continuations(&mut self) -> (u64, ImageCallback, FailureCallback) {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let settled = Arc::new(AtomicBool::new(false));

        let success_sender = self.sender.clone();
        let success_settled = Arc::clone(&settled);
        let on_success: ImageCallback = Box::new(move |image| {
            if !success_settled.swap(true, Ordering::SeqCst) {
                // The storage may already be gone; nothing to deliver to then.
                let _ = success_sender.send(ResolutionMessage {
                    ticket,
                    outcome: ResolutionOutcome::Loaded(image),
                });
            }
        });

        let failure_sender = self.sender.clone();
        let on_failure: FailureCallback = Box::new(move || {
            if !settled.swap(true, Ordering::SeqCst) {
                let _ = failure_sender.send(ResolutionMessage {
                    ticket,
                    outcome: ResolutionOutcome::Failed,
                });
            }
        });

        (ticket, on_success, on_failure)
    }

    /// Take every message delivered so far.
    pub fn drain(&self) -> Vec<ResolutionMessage> {
        self.receiver.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::Size;
    use std::thread;

    #[test]
    fn test_only_first_continuation_counts() {
        let mut queue = ResolutionQueue::new();
        let (ticket, on_success, on_failure) = queue.continuations();
        on_failure();
        on_success(Image::new(Size::new(1.0, 1.0), vec![0]));

        let messages = queue.drain();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].ticket, ticket);
        assert_eq!(messages[0].outcome, ResolutionOutcome::Failed);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_continuations_cross_threads() {
        let mut queue = ResolutionQueue::new();
        let (first, on_success, _) = queue.continuations();
        let (second, _, on_failure) = queue.continuations();
        assert_ne!(first, second);

        let worker = thread::spawn(move || {
            on_success(Image::new(Size::new(4.0, 3.0), vec![9; 12]));
            on_failure();
        });
        worker.join().unwrap();

        let mut tickets: Vec<_> = queue.drain().into_iter().map(|m| m.ticket).collect();
        tickets.sort_unstable();
        assert_eq!(tickets, vec![first, second]);
    }
}
