pub mod access;
pub mod challenge;
pub mod resolver;

pub use access::apply;
pub use resolver::resolve_bearer_token;
