pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod logging;
pub mod redirect;
pub mod response;
pub mod role;
pub mod session;
pub mod storage;
pub mod user;

pub use api::ApiClient;
pub use client::{AuthBackend, DemoBackend, HttpAuthBackend, LoginOutcome, backend_from_config};
pub use config::Config;
pub use error::SessionError;
pub use guard::{can_enter, deny_redirect, public_redirect};
pub use logging::{init_logging, init_logging_with_level};
pub use redirect::{View, landing_for};
pub use role::Role;
pub use session::{AuthState, SessionStore};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use user::{User, is_valid_curp};
