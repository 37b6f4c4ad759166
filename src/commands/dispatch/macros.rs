/// Trace command execution if verbose mode is enabled
///
/// Usage:
/// ```ignore
/// trace_command!(cli, start, "load_rubric");
/// ```
macro_rules! trace_command {
    ($cli:expr, $start:expr, $label:expr) => {
        if $cli.verbose {
            ::tracing::debug!(elapsed = ?$start.elapsed(), $label);
        }
    };
}

pub(crate) use trace_command;
