use crate::api::Endpoint;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_TTL: Duration = Duration::from_secs(5);
pub const DEFAULT_CAPACITY: usize = 3;

/// A transient, user-facing message about a failed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub description: &'static str,
    pub raised_at: Instant,
}

impl Notification {
    pub fn fetch_failed(endpoint: Endpoint, raised_at: Instant) -> Self {
        let (title, description) = match endpoint {
            Endpoint::Latest => (
                "Error",
                "Failed to fetch stock data. Make sure the backend is running.",
            ),
            Endpoint::Predict => (
                "Prediction Error",
                "Not enough data yet. The backend needs more stock history.",
            ),
            Endpoint::History => (
                "Fetch Error",
                "Unable to load stock history. Check backend connection.",
            ),
        };
        Self {
            title,
            description,
            raised_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notifications {
    items: VecDeque<Notification>,
    ttl: Duration,
    capacity: usize,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CAPACITY)
    }
}

impl Notifications {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            ttl,
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, notification: Notification) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    /// Drops expired entries.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items
            .retain(|n| now.saturating_duration_since(n.raised_at) < ttl);
    }

    /// Newest last.
    pub fn active(&self, now: Instant) -> impl Iterator<Item = &Notification> {
        let ttl = self.ttl;
        self.items
            .iter()
            .filter(move |n| now.saturating_duration_since(n.raised_at) < ttl)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_name_the_failing_operation() {
        let now = Instant::now();
        assert_eq!(Notification::fetch_failed(Endpoint::Latest, now).title, "Error");
        assert_eq!(
            Notification::fetch_failed(Endpoint::Predict, now).title,
            "Prediction Error"
        );
        assert_eq!(
            Notification::fetch_failed(Endpoint::History, now).title,
            "Fetch Error"
        );
    }

    #[test]
    fn entries_expire_after_ttl() {
        let t0 = Instant::now();
        let mut queue = Notifications::new(Duration::from_secs(5), 3);
        queue.push(Notification::fetch_failed(Endpoint::Latest, t0));
        queue.push(Notification::fetch_failed(
            Endpoint::History,
            t0 + Duration::from_secs(3),
        ));

        assert_eq!(queue.active(t0 + Duration::from_secs(4)).count(), 2);
        let later: Vec<_> = queue.active(t0 + Duration::from_secs(6)).collect();
        assert_eq!(later.len(), 1);
        assert_eq!(later[0].title, "Fetch Error");

        queue.prune(t0 + Duration::from_secs(9));
        assert!(queue.is_empty());
    }

    #[test]
    fn capacity_drops_oldest() {
        let t0 = Instant::now();
        let mut queue = Notifications::new(Duration::from_secs(5), 2);
        queue.push(Notification::fetch_failed(Endpoint::Latest, t0));
        queue.push(Notification::fetch_failed(Endpoint::Predict, t0));
        queue.push(Notification::fetch_failed(Endpoint::History, t0));

        let titles: Vec<_> = queue.active(t0).map(|n| n.title).collect();
        assert_eq!(titles, vec!["Prediction Error", "Fetch Error"]);
    }
}
