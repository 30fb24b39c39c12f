//! Webless DNS Domain Layer
pub mod clock;
pub mod config;
pub mod domain_health;
pub mod email_domain;
pub mod errors;
pub mod verdict;

pub use config::{CliOverrides, Config, ConfigError};
pub use domain_health::DomainHealth;
pub use email_domain::EmailDomain;
pub use errors::DomainError;
pub use verdict::{Resolution, Verdict};
