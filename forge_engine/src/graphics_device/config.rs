/// Graphics device configuration

/// Which driver debug messages are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugSeverity {
    /// Only errors
    ErrorsOnly,
    /// Errors and warnings
    ErrorsAndWarnings,
    /// Everything, including notifications
    All,
}

/// Where driver debug messages go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugOutput {
    /// Colored console output
    Console,
    /// Append to a log file
    File(String),
    /// Console and log file
    Both(String),
}

/// Graphics device configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Install the driver debug message callback (when the backend supports it)
    pub enable_debug_output: bool,
    /// Minimum class of debug messages to report
    pub debug_severity: DebugSeverity,
    /// Destination of debug messages
    pub debug_output: DebugOutput,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_debug_output: cfg!(debug_assertions),
            debug_severity: DebugSeverity::ErrorsAndWarnings,
            debug_output: DebugOutput::Console,
        }
    }
}
