//! Observability infrastructure: logging setup, phase tracking and crash
//! reports.
//!
//! Install the panic hook and subscriber at startup:
//!
//! ```ignore
//! use censusmap::observability::{init_tracing, install_panic_hook};
//!
//! fn main() {
//!     install_panic_hook();
//!     init_tracing(1);
//! }
//! ```

pub mod context;
pub mod panic_hook;
pub mod tracing;

pub use context::{
    get_current_context, reset_context, set_phase, set_section, set_source, ContextGuard, Phase,
    RunContext,
};
pub use panic_hook::install_panic_hook;
pub use self::tracing::{default_directive, init_tracing};
