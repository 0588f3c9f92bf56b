//! Service health board and simulated degradation.
//!
//! A degradation overwrites one service with a "Degraded" warning and hands
//! back a [`Degradation`] carrying the level and text captured at selection
//! time. Restoring writes exactly those values back.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use rand::Rng;

/// Time a degraded service stays degraded.
pub const DEGRADATION_DURATION: Duration = Duration::from_secs(5);

/// Text shown on a degraded service.
pub const DEGRADED_TEXT: &str = "Degraded";

/// Services shown when none are configured.
pub const DEFAULT_SERVICES: [&str; 5] = [
    "API Gateway",
    "Database",
    "Cache Layer",
    "Auth Service",
    "File Storage",
];

/// Health level of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceLevel {
    Ok,
    Warning,
    Error,
}

impl ServiceLevel {
    /// Style class of the status badge.
    pub fn class(&self) -> &'static str {
        match self {
            ServiceLevel::Ok => "status-ok",
            ServiceLevel::Warning => "status-warning",
            ServiceLevel::Error => "status-error",
        }
    }
}

impl fmt::Display for ServiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class())
    }
}

/// Status of one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    pub name: String,
    pub level: ServiceLevel,
    pub text: String,
}

impl ServiceStatus {
    pub fn operational(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: ServiceLevel::Ok,
            text: "Operational".to_string(),
        }
    }

    /// Full badge class, e.g. `service-status status-ok`.
    pub fn class_name(&self) -> String {
        format!("service-status {}", self.level.class())
    }
}

/// State captured when a service was degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degradation {
    pub index: usize,
    pub prior_level: ServiceLevel,
    pub prior_text: String,
}

/// All monitored services, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBoard {
    services: Vec<ServiceStatus>,
}

impl ServiceBoard {
    pub fn new(services: Vec<ServiceStatus>) -> Self {
        Self { services }
    }

    /// Board with every named service operational.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(ServiceStatus::operational).collect())
    }

    pub fn services(&self) -> &[ServiceStatus] {
        &self.services
    }

    pub fn get(&self, index: usize) -> Option<&ServiceStatus> {
        self.services.get(index)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Degrade the service at `index`.
    pub fn degrade(&mut self, index: usize) -> Option<Degradation> {
        let service = self.services.get_mut(index)?;
        let degradation = Degradation {
            index,
            prior_level: service.level,
            prior_text: std::mem::replace(&mut service.text, DEGRADED_TEXT.to_string()),
        };
        service.level = ServiceLevel::Warning;
        Some(degradation)
    }

    /// Degrade a uniformly chosen service.
    pub fn degrade_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Degradation> {
        if self.services.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.services.len());
        self.degrade(index)
    }

    /// Write back the captured level and text.
    pub fn restore(&mut self, degradation: &Degradation) {
        if let Some(service) = self.services.get_mut(degradation.index) {
            service.level = degradation.prior_level;
            service.text = degradation.prior_text.clone();
        }
    }

    /// Service name to status text, as used in exports.
    pub fn status_map(&self) -> BTreeMap<String, String> {
        self.services
            .iter()
            .map(|s| (s.name.clone(), s.text.clone()))
            .collect()
    }
}

impl Default for ServiceBoard {
    fn default() -> Self {
        Self::with_names(DEFAULT_SERVICES)
    }
}
