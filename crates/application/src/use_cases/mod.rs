mod resolve_query;
mod seed_domain;

pub use resolve_query::ResolveQueryUseCase;
pub use seed_domain::SeedDomainUseCase;
