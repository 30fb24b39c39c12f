#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use webless_application::ports::{DomainHealthCache, QueryObserver};
use webless_domain::{DomainHealth, Resolution};

/// In-memory stand-in for the shared health cache. Records which names were
/// created so tests can assert on monitor-spawning side effects.
pub struct MockHealthCache {
    entries: Mutex<HashMap<String, Arc<DomainHealth>>>,
    created: Mutex<Vec<String>>,
}

impl MockHealthCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            created: Mutex::new(Vec::new()),
        }
    }

    /// Pre-populates a domain that has validated at least once.
    pub fn insert_valid(&self, name: &str) -> Arc<DomainHealth> {
        let health = Arc::new(DomainHealth::new(name));
        health.record_success();
        self.insert(name, health.clone());
        health
    }

    /// Pre-populates a never-validated domain with a failure streak.
    pub fn insert_failing(&self, name: &str, failures: u32) -> Arc<DomainHealth> {
        let health = Arc::new(DomainHealth::new(name));
        for _ in 0..failures {
            health.record_failure();
        }
        self.insert(name, health.clone());
        health
    }

    /// Pre-populates a domain that was valid once but has failed out of its
    /// allowance since.
    pub fn insert_degraded(&self, name: &str, failures: u32) -> Arc<DomainHealth> {
        let health = Arc::new(DomainHealth::new(name));
        health.record_success();
        for _ in 0..failures {
            health.record_failure();
        }
        self.insert(name, health.clone());
        health
    }

    fn insert(&self, name: &str, health: Arc<DomainHealth>) {
        self.entries.lock().unwrap().insert(name.to_string(), health);
    }

    /// Names passed to `get_or_create` that were not already present.
    pub fn created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }
}

impl Default for MockHealthCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainHealthCache for MockHealthCache {
    fn get(&self, name: &str) -> Option<Arc<DomainHealth>> {
        self.entries.lock().unwrap().get(name).cloned()
    }

    fn get_or_create(&self, name: &str) -> Arc<DomainHealth> {
        let mut entries = self.entries.lock().unwrap();
        if let Some(existing) = entries.get(name) {
            return existing.clone();
        }
        let health = Arc::new(DomainHealth::new(name));
        entries.insert(name.to_string(), health.clone());
        self.created.lock().unwrap().push(name.to_string());
        health
    }

    fn insert_permanent(&self, name: &str, valid: bool) {
        self.entries
            .lock()
            .unwrap()
            .insert(name.to_string(), Arc::new(DomainHealth::permanent(name, valid)));
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

/// Observer that records every hook invocation.
#[derive(Default)]
pub struct RecordingObserver {
    requests: Mutex<Vec<(u16, String, Option<String>)>>,
    responses: Mutex<Vec<(u16, Resolution)>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<(u16, String, Option<String>)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn responses(&self) -> Vec<(u16, Resolution)> {
        self.responses.lock().unwrap().clone()
    }
}

impl QueryObserver for RecordingObserver {
    fn on_request(&self, query_id: u16, raw_query: &str, email_domain: Option<&str>) {
        self.requests.lock().unwrap().push((
            query_id,
            raw_query.to_string(),
            email_domain.map(str::to_string),
        ));
    }

    fn on_response(&self, query_id: u16, resolution: &Resolution) {
        self.responses.lock().unwrap().push((query_id, *resolution));
    }
}
