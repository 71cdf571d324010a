//! Custom panic hook for structured crash reports.
//!
//! Prints what was being processed (phase, survey file, section), the panic
//! message and location, and a stack trace when `RUST_BACKTRACE` is set.

use super::context::{get_current_context, RunContext};
use std::panic::PanicHookInfo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the custom panic hook. Call early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();

    eprintln!();
    print_header();
    print_panic_details(info);
    print_context_section(&context);
    print_backtrace_section();
}

fn print_header() {
    let platform = std::env::consts::OS;
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

    eprintln!("╔══════════════════════════════════════════════════════════════════════════════╗");
    eprintln!("║                          CENSUSMAP CRASH REPORT                              ║");
    eprintln!("╠══════════════════════════════════════════════════════════════════════════════╣");
    eprintln!("║  Version: {:<67} ║", VERSION);
    eprintln!("║  Platform: {:<66} ║", platform);
    eprintln!("║  Time: {:<70} ║", timestamp);
    eprintln!("╠══════════════════════════════════════════════════════════════════════════════╣");
}

fn print_panic_details(info: &PanicHookInfo<'_>) {
    let message = extract_panic_message(info);
    eprintln!("║  PANIC: {:<68} ║", truncate(&message, 68));

    if let Some(location) = info.location() {
        let loc_str = format!(
            "{}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        );
        eprintln!("║  Location: {:<66} ║", truncate(&loc_str, 66));
    }
}

fn print_context_section(context: &RunContext) {
    eprintln!("╠══════════════════════════════════════════════════════════════════════════════╣");
    eprintln!("║  OPERATION CONTEXT:                                                          ║");

    match &context.phase {
        Some(phase) => eprintln!("║    Phase: {:<66} ║", phase),
        None => eprintln!(
            "║    Phase: (not set - crash occurred before loading started)                  ║"
        ),
    }

    if let Some(source) = &context.source {
        let source = source.display().to_string();
        eprintln!("║    Survey: {:<65} ║", truncate(&source, 65));
    }

    if let Some(section) = &context.section {
        eprintln!("║    Section: {:<64} ║", truncate(section, 64));
    }
}

fn print_backtrace_section() {
    eprintln!("╠══════════════════════════════════════════════════════════════════════════════╣");

    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!("║  STACK TRACE:                                                                ║");
        eprintln!("╚══════════════════════════════════════════════════════════════════════════════╝");
        eprintln!();
        eprintln!("{}", std::backtrace::Backtrace::capture());
    } else {
        eprintln!("║  Run with RUST_BACKTRACE=1 for stack trace                                   ║");
        eprintln!("╚══════════════════════════════════════════════════════════════════════════════╝");
    }
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
