/// Async sleep for either target.
pub async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    {
        gloo_timers::future::TimeoutFuture::new(ms.min(u32::MAX as u64) as u32).await;
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    }
}

/// Uppercase initial shown on artist avatars.
pub fn initial<S: AsRef<str>>(s: S) -> String {
    s.as_ref()
        .trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

/// "1 song", "3 songs".
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_uppercases_first_char() {
        assert_eq!(initial(" radiohead"), "R");
        assert_eq!(initial("émilie"), "É");
        assert_eq!(initial(""), "?");
    }

    #[test]
    fn pluralize_handles_one() {
        assert_eq!(pluralize(1, "song"), "1 song");
        assert_eq!(pluralize(0, "album"), "0 albums");
    }
}
