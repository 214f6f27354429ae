/// OpenGL Debug Output - Handles KHR_debug messages with colored output
///
/// The driver reports messages through a callback installed on the context.
/// Messages are filtered by the configured severity and written to the
/// console, a log file, or both.

use colored::*;
use forge_engine::forge::render::{Config, DebugOutput, DebugSeverity};
use forge_engine::{engine_info, engine_warn};
use glow::HasContext;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static WRITE_FAILURE_REPORTED: AtomicBool = AtomicBool::new(false);

/// Message class after folding the driver's type and severity together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageClass {
    Error,
    Warning,
    Info,
}

/// Settings captured by the callback
#[derive(Debug, Clone)]
pub(crate) struct DebugConfig {
    pub severity: DebugSeverity,
    pub output: DebugOutput,
}

/// Install the debug message callback on a context
///
/// Returns `false` when the context does not expose KHR_debug.
pub(crate) fn install(gl: &mut glow::Context, config: &Config) -> bool {
    if !gl.supports_debug() {
        engine_warn!("forge::gl", "Debug output requested but KHR_debug is not supported");
        return false;
    }

    let debug_config = DebugConfig {
        severity: config.debug_severity,
        output: config.debug_output.clone(),
    };

    unsafe {
        gl.enable(glow::DEBUG_OUTPUT);
        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback(move |source, gl_type, id, severity, message| {
            handle_message(&debug_config, source, gl_type, id, severity, message);
        });
    }

    engine_info!("forge::gl", "Debug output enabled ({:?})", config.debug_severity);
    true
}

/// Fold a driver message type and severity into a message class
pub(crate) fn classify(gl_type: u32, severity: u32) -> MessageClass {
    if gl_type == glow::DEBUG_TYPE_ERROR || severity == glow::DEBUG_SEVERITY_HIGH {
        return MessageClass::Error;
    }
    match severity {
        glow::DEBUG_SEVERITY_MEDIUM | glow::DEBUG_SEVERITY_LOW => MessageClass::Warning,
        _ => MessageClass::Info,
    }
}

/// Whether a message class passes the configured filter
pub(crate) fn should_report(filter: DebugSeverity, class: MessageClass) -> bool {
    match filter {
        DebugSeverity::ErrorsOnly => class == MessageClass::Error,
        DebugSeverity::ErrorsAndWarnings => class != MessageClass::Info,
        DebugSeverity::All => true,
    }
}

pub(crate) fn source_label(source: u32) -> &'static str {
    match source {
        glow::DEBUG_SOURCE_API => "API",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        glow::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        glow::DEBUG_SOURCE_APPLICATION => "Application",
        _ => "Other",
    }
}

pub(crate) fn type_label(gl_type: u32) -> &'static str {
    match gl_type {
        glow::DEBUG_TYPE_ERROR => "Error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
        glow::DEBUG_TYPE_PORTABILITY => "Portability",
        glow::DEBUG_TYPE_PERFORMANCE => "Performance",
        _ => "General",
    }
}

/// Plain-text rendering of a message (file output)
pub(crate) fn format_plain(source: u32, gl_type: u32, id: u32, class: MessageClass, message: &str) -> String {
    let severity = match class {
        MessageClass::Error => "ERROR",
        MessageClass::Warning => "WARNING",
        MessageClass::Info => "INFO",
    };
    format!(
        "[GL {}] [{}/{}]\n  ├─ Message ID: {}\n  └─ {}\n",
        severity,
        source_label(source),
        type_label(gl_type),
        id,
        message.trim_end()
    )
}

fn handle_message(config: &DebugConfig, source: u32, gl_type: u32, id: u32, severity: u32, message: &str) {
    let class = classify(gl_type, severity);
    if !should_report(config.severity, class) {
        return;
    }

    let severity_colored = match class {
        MessageClass::Error => "ERROR".red().bold(),
        MessageClass::Warning => "WARNING".yellow().bold(),
        MessageClass::Info => "INFO".cyan(),
    };

    let console_output = format!(
        "{} {} [{}/{}]\n  ├─ {}: {}\n  └─ {}\n",
        "[GL".bright_blue().bold(),
        format!("{}]", severity_colored).bright_blue().bold(),
        source_label(source).bright_black(),
        type_label(gl_type).bright_black(),
        "Message ID".bright_black(),
        id,
        message.trim_end().white()
    );

    match &config.output {
        DebugOutput::Console => {
            eprint!("{}", console_output);
        }
        DebugOutput::File(path) => {
            write_to_file(path, &format_plain(source, gl_type, id, class, message));
        }
        DebugOutput::Both(path) => {
            eprint!("{}", console_output);
            write_to_file(path, &format_plain(source, gl_type, id, class, message));
        }
    }
}

/// Append a message to the log file
fn write_to_file(path: &str, message: &str) {
    let result = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| writeln!(file, "{}", message));

    if let Err(e) = result {
        report_write_failure(path, &e);
    }
}

/// Warn about the first failed write only
///
/// Returns `true` if this call emitted the warning.
fn report_write_failure(path: &str, error: &std::io::Error) -> bool {
    if WRITE_FAILURE_REPORTED.swap(true, Ordering::Relaxed) {
        return false;
    }
    engine_warn!("forge::gl", "Could not write debug output to \"{}\": {}", path, error);
    true
}

#[cfg(test)]
#[path = "debug_tests.rs"]
mod tests;
