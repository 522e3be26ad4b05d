//! Aspects of Nature engine library.
//!
//! Server-side orchestration around the sheet domain.
//!
//! ## Structure
//!
//! - `use_cases/` - Sheet operations over stored characters
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
