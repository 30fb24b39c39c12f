pub mod handler;
pub mod zone;

pub use handler::WeblessRequestHandler;
pub use zone::ZoneAuthority;
