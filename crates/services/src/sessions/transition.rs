/// Which presentation transition an action is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Card flip before the answer face shows.
    Flip,
    /// Card slide before the next item shows.
    Slide,
}

/// Token returned by a gated action; hand it back to complete the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionTicket {
    id: u64,
    kind: TransitionKind,
}

impl TransitionTicket {
    #[must_use]
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }
}

/// Single-slot lock guarding a deferred mutation `P`.
///
/// While held, further gated actions are dropped. Releasing requires the
/// ticket that acquired the lock; any other ticket leaves it held.
#[derive(Debug, Clone)]
pub(crate) struct TransitionLock<P> {
    next_id: u64,
    held: Option<(TransitionTicket, P)>,
}

impl<P> Default for TransitionLock<P> {
    fn default() -> Self {
        Self {
            next_id: 0,
            held: None,
        }
    }
}

impl<P> TransitionLock<P> {
    pub(crate) fn is_held(&self) -> bool {
        self.held.is_some()
    }

    /// `None` when a transition is already in flight.
    pub(crate) fn try_acquire(&mut self, kind: TransitionKind, pending: P) -> Option<TransitionTicket> {
        if self.held.is_some() {
            return None;
        }
        self.next_id = self.next_id.wrapping_add(1);
        let ticket = TransitionTicket {
            id: self.next_id,
            kind,
        };
        self.held = Some((ticket, pending));
        Some(ticket)
    }

    /// Returns the deferred mutation if `ticket` is the one in flight.
    pub(crate) fn release(&mut self, ticket: TransitionTicket) -> Option<P> {
        match self.held.take() {
            Some((held, pending)) if held == ticket => Some(pending),
            other => {
                self.held = other;
                None
            }
        }
    }

    /// Drops whatever is in flight.
    pub(crate) fn clear(&mut self) {
        self.held = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_refused_while_held() {
        let mut lock = TransitionLock::default();
        let ticket = lock.try_acquire(TransitionKind::Flip, 1).unwrap();
        assert!(lock.try_acquire(TransitionKind::Slide, 2).is_none());
        assert_eq!(lock.release(ticket), Some(1));
        assert!(!lock.is_held());
    }

    #[test]
    fn stale_ticket_keeps_lock() {
        let mut lock = TransitionLock::default();
        let first = lock.try_acquire(TransitionKind::Flip, "a").unwrap();
        assert_eq!(lock.release(first), Some("a"));
        let second = lock.try_acquire(TransitionKind::Slide, "b").unwrap();
        assert_ne!(first, second);
        assert_eq!(lock.release(first), None);
        assert!(lock.is_held());
        assert_eq!(second.kind(), TransitionKind::Slide);
        lock.clear();
        assert_eq!(lock.release(second), None);
    }
}
