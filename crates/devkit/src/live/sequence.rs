use std::sync::atomic::{AtomicU64, Ordering};

/// Last-write-wins ordering for results computed out of order
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: AtomicU64,
}

/// Generation number handed out by [`Sequencer::submit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

impl Sequencer {
    /// Start a new generation, making every earlier ticket stale
    pub fn submit(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Hand back `value` only if no newer ticket was submitted meanwhile
    pub fn complete<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            log::debug!("discarding stale result #{}", ticket.0);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_submit_is_monotonic() {
        let sequencer = Sequencer::default();
        let first = sequencer.submit();
        let second = sequencer.submit();
        assert!(second > first);
        assert_eq!(second.generation(), 2);
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let sequencer = Sequencer::default();
        let stale = sequencer.submit();
        let current = sequencer.submit();

        assert_eq!(sequencer.complete(stale, "old"), None);
        assert_eq!(sequencer.complete(current, "new"), Some("new"));
    }

    #[tokio::test]
    async fn test_slow_stale_result_loses_to_fast_current_one() {
        let sequencer = Arc::new(Sequencer::default());

        let slow = {
            let sequencer = Arc::clone(&sequencer);
            let ticket = sequencer.submit();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(40)).await;
                sequencer.complete(ticket, "slow")
            })
        };

        let fast = {
            let sequencer = Arc::clone(&sequencer);
            let ticket = sequencer.submit();
            tokio::spawn(async move { sequencer.complete(ticket, "fast") })
        };

        assert_eq!(fast.await.unwrap(), Some("fast"));
        assert_eq!(slow.await.unwrap(), None);
    }
}
