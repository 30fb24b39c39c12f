use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Query name outside zone: {0}")]
    OutsideZone(String),

    #[error("Invalid email domain: {0}")]
    InvalidEmailDomain(String),
}
