//! Thread-local context tracking for crash reports.
//!
//! Records the pipeline phase and the survey file being processed so the
//! panic hook can say what censusmap was doing when it crashed. Guards use
//! RAII to restore the previous context on drop.

use std::cell::RefCell;
use std::path::PathBuf;

thread_local! {
    static CURRENT_CONTEXT: RefCell<RunContext> = const { RefCell::new(RunContext::new()) };
}

/// Context snapshot for the current run.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    /// Current pipeline phase
    pub phase: Option<Phase>,
    /// Survey file being processed
    pub source: Option<PathBuf>,
    /// Report section being built (if applicable)
    pub section: Option<String>,
}

impl RunContext {
    /// Create a new empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            source: None,
            section: None,
        }
    }
}

/// Pipeline phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reading configuration files
    ConfigLoading,
    /// Reading and normalizing the survey file
    Loading,
    /// Evaluating indicator rules
    IndicatorDerivation,
    /// Summing indicators into scores
    Scoring,
    /// Building descriptive sections
    SectionBuilding,
    /// Writing the report
    OutputGeneration,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigLoading => write!(f, "config_loading"),
            Self::Loading => write!(f, "loading"),
            Self::IndicatorDerivation => write!(f, "indicator_derivation"),
            Self::Scoring => write!(f, "scoring"),
            Self::SectionBuilding => write!(f, "section_building"),
            Self::OutputGeneration => write!(f, "output_generation"),
        }
    }
}

/// RAII guard restoring the previous context on drop.
pub struct ContextGuard {
    previous: RunContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

fn update(apply: impl FnOnce(&mut RunContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        apply(&mut ctx.borrow_mut());
        ContextGuard { previous }
    })
}

/// Set the current phase until the guard drops.
///
/// ```ignore
/// let _phase = set_phase(Phase::Scoring);
/// // Phase restored when _phase drops
/// ```
#[must_use]
pub fn set_phase(phase: Phase) -> ContextGuard {
    update(|ctx| ctx.phase = Some(phase))
}

/// Set the survey file being processed until the guard drops.
#[must_use]
pub fn set_source(path: impl Into<PathBuf>) -> ContextGuard {
    let path = path.into();
    update(move |ctx| ctx.source = Some(path))
}

/// Set the section being built until the guard drops.
#[must_use]
pub fn set_section(name: impl Into<String>) -> ContextGuard {
    let name = name.into();
    update(move |ctx| ctx.section = Some(name))
}

/// Get the current context snapshot.
#[must_use]
pub fn get_current_context() -> RunContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Reset the current thread's context to empty.
pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = RunContext::new();
    });
}
