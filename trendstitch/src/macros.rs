/// Narrate stitching progress: `info` when the run is verbose, `debug` otherwise.
macro_rules! progress {
    ($verbose:expr, $($arg:tt)+) => {{
        #[cfg(feature = "tracing")]
        {
            if $verbose {
                tracing::info!(target: "trendstitch::progress", $($arg)+);
            } else {
                tracing::debug!(target: "trendstitch::progress", $($arg)+);
            }
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = $verbose;
        }
    }};
}
