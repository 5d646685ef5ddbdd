use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::report::AnalysisReport;

/// Reports keyed by a hash of the analyzed text.
pub struct Cache {
    reports: Arc<DashMap<String, AnalysisReport>>,
    max_entries: usize,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl Cache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            reports: Arc::new(DashMap::new()),
            max_entries,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub fn set_report(&self, text: &str, report: AnalysisReport) {
        if self.max_entries == 0 {
            return;
        }
        if self.reports.len() >= self.max_entries {
            // Simple eviction: clear 25% when full
            let to_remove: Vec<_> = self
                .reports
                .iter()
                .take((self.max_entries / 4).max(1))
                .map(|r| r.key().clone())
                .collect();
            for key in to_remove {
                self.reports.remove(&key);
            }
        }
        let key = self.hash_text(text);
        self.reports.insert(key, report);
    }

    pub fn get_report(&self, text: &str) -> Option<AnalysisReport> {
        let key = self.hash_text(text);
        let found = self.reports.get(&key).map(|r| r.value().clone());
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    fn hash_text(&self, text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            reports_cached: self.reports.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    pub reports_cached: usize,
    pub hits: usize,
    pub misses: usize,
}
