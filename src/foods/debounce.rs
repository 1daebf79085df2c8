use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use uuid::Uuid;

/// Per-user "latest search wins" gate.
///
/// Each search takes a ticket; a ticket is stale once the same user has
/// started a newer search. Stale searches are dropped, both after the
/// debounce wait and after the lookup returns. A user is only tracked while
/// one of their searches is running.
#[derive(Clone)]
pub struct SearchGate {
    debounce: Duration,
    // ticket numbers are global so a forgotten user can never reissue one
    next_ticket: Arc<AtomicU64>,
    latest: Arc<Mutex<HashMap<Uuid, u64>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    user_id: Uuid,
    number: u64,
}

impl SearchGate {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            next_ticket: Arc::new(AtomicU64::new(0)),
            latest: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn begin(&self, user_id: Uuid) -> SearchTicket {
        let number = self.next_ticket.fetch_add(1, Ordering::Relaxed) + 1;
        let mut map = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        map.insert(user_id, number);
        SearchTicket { user_id, number }
    }

    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        let map = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        map.get(&ticket.user_id) == Some(&ticket.number)
    }

    /// Waits out the debounce window; true if the ticket is still the latest.
    pub async fn settle(&self, ticket: &SearchTicket) -> bool {
        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }
        self.is_current(ticket)
    }

    /// Ends a search. Returns whether it was still the latest; if so the
    /// user stops being tracked.
    pub fn finish(&self, ticket: &SearchTicket) -> bool {
        let mut map = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        if map.get(&ticket.user_id) == Some(&ticket.number) {
            map.remove(&ticket.user_id);
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    fn tracked_users(&self) -> usize {
        self.latest.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older() {
        let gate = SearchGate::new(Duration::ZERO);
        let user = Uuid::new_v4();
        let first = gate.begin(user);
        assert!(gate.is_current(&first));

        let second = gate.begin(user);
        assert!(!gate.is_current(&first));
        assert!(gate.is_current(&second));
    }

    #[test]
    fn users_do_not_interfere() {
        let gate = SearchGate::new(Duration::ZERO);
        let alice = gate.begin(Uuid::new_v4());
        let _bob = gate.begin(Uuid::new_v4());
        assert!(gate.is_current(&alice));
    }

    #[test]
    fn finished_searches_are_forgotten() {
        let gate = SearchGate::new(Duration::ZERO);
        let user = Uuid::new_v4();
        let stale = gate.begin(user);
        let latest = gate.begin(user);

        assert!(!gate.finish(&stale));
        assert_eq!(gate.tracked_users(), 1);
        assert!(gate.finish(&latest));
        assert_eq!(gate.tracked_users(), 0);

        // a later search never revives the stale ticket
        let next = gate.begin(user);
        assert!(!gate.is_current(&stale));
        assert!(gate.is_current(&next));
    }

    #[tokio::test]
    async fn only_last_search_in_burst_survives_debounce() {
        let gate = SearchGate::new(Duration::from_millis(30));
        let user = Uuid::new_v4();

        let early = gate.begin(user);
        let early_wait = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.settle(&early).await })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        let late = gate.begin(user);

        assert!(gate.settle(&late).await);
        assert!(!early_wait.await.unwrap());
    }
}
