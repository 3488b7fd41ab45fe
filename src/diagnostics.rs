/// Start marker for [`log_perf`], in epoch milliseconds (works on wasm).
#[inline]
pub fn perf_start() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[inline]
pub fn log_perf(scope: &str, started_at_ms: i64, details: &str) {
    let elapsed_ms = perf_start() - started_at_ms;
    if details.trim().is_empty() {
        tracing::debug!("[perf] {scope} took {elapsed_ms}ms");
    } else {
        tracing::debug!("[perf] {scope} took {elapsed_ms}ms | {details}");
    }
}
