//! Experience Gate - Landing Branch Selection
//!
//! Combines the one-shot visitor classification with the live quote
//! feed and exposes the view the rendering layer consumes: humans get
//! the decoy branch, classified crawlers get the promo branch with the
//! current ticker list. The classification is fixed for the process
//! lifetime; only the quote list changes.

use tokio::sync::watch;

use crate::domain::quote::PriceQuote;

/// The two landing experiences.
#[derive(Debug, Clone, PartialEq)]
pub enum Experience {
    /// Static decoy shown to human visitors. What gets drawn is
    /// presentation-only and lives outside this crate.
    Decoy,
    /// Marketing page with the price ticker, shown to crawlers.
    Promo {
        /// Quote list at read time (live or fallback).
        quotes: Vec<PriceQuote>,
    },
}

/// Read surface handed to the rendering layer.
pub struct ExperienceGate {
    /// Classification result, computed once at startup.
    is_crawler: bool,
    /// Live view of the published quote list.
    quotes_rx: watch::Receiver<Vec<PriceQuote>>,
}

impl ExperienceGate {
    /// Create a gate from a classification and a quote subscription.
    pub fn new(is_crawler: bool, quotes_rx: watch::Receiver<Vec<PriceQuote>>) -> Self {
        Self {
            is_crawler,
            quotes_rx,
        }
    }

    /// Classification result (true = crawler).
    pub fn is_crawler(&self) -> bool {
        self.is_crawler
    }

    /// Snapshot of the experience a renderer would draw right now.
    ///
    /// Only the promo branch reads the quote list; the decoy branch
    /// never touches the feed.
    pub fn experience(&self) -> Experience {
        if self.is_crawler {
            Experience::Promo {
                quotes: self.quotes_rx.borrow().clone(),
            }
        } else {
            Experience::Decoy
        }
    }

    /// Wait for the next quote refresh, then return the fresh view.
    ///
    /// Resolves on every publication, including the first one. Returns
    /// `None` once the poller is gone and no further refresh can arrive.
    pub async fn changed(&mut self) -> Option<Experience> {
        self.quotes_rx.changed().await.ok()?;
        Some(self.experience())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::fallback_quotes;

    #[test]
    fn test_human_gets_decoy_regardless_of_quotes() {
        let (tx, rx) = watch::channel(fallback_quotes());
        let gate = ExperienceGate::new(false, rx);
        assert_eq!(gate.experience(), Experience::Decoy);
        drop(tx);
    }

    #[test]
    fn test_crawler_gets_promo_with_current_list() {
        let (tx, rx) = watch::channel(Vec::new());
        let gate = ExperienceGate::new(true, rx);

        tx.send_replace(fallback_quotes());
        match gate.experience() {
            Experience::Promo { quotes } => assert_eq!(quotes.len(), 5),
            Experience::Decoy => panic!("crawler must see the promo branch"),
        }
    }

    #[tokio::test]
    async fn test_changed_resolves_on_refresh() {
        let (tx, rx) = watch::channel(Vec::new());
        let mut gate = ExperienceGate::new(true, rx);

        tx.send_replace(fallback_quotes());
        match gate.changed().await {
            Some(Experience::Promo { quotes }) => assert_eq!(quotes[0].id, "bitcoin"),
            other => panic!("crawler must see the promo branch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_changed_ends_when_poller_is_gone() {
        let (tx, rx) = watch::channel(Vec::new());
        let mut gate = ExperienceGate::new(true, rx);

        drop(tx);
        assert!(gate.changed().await.is_none());
    }
}
