//! Structured diagnostics for the encoder.
//!
//! The `log_metric!` macro emits a single `key=value` record through the `log`
//! facade at debug level. Calls are compiled out of release builds, so it is
//! safe to leave them on hot paths such as `finalize`.

/// Logs a structured key-value metric record, only in debug builds.
///
/// # Example
/// ```
/// use nimble_encoder::log_metric;
/// let total = 24;
/// log_metric!("event"="finalize", "total_len"=&total);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            let mut parts: Vec<String> = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            $crate::__log::debug!(target: "nimble_metric", "NIMBLE_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}
