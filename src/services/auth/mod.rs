pub mod factory;

pub use factory::build_auth_state;
