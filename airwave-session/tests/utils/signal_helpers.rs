use airwave_core::Signal;
use airwave_relay::Subscription;
use std::time::Duration;

pub const SIGNAL_TIMEOUT_MS: u64 = 5000;
pub const EVENT_TIMEOUT_MS: u64 = 5000;

/// Pull decodable signals off a tap until one matches the predicate, the
/// stream ends, or the timeout trips.
pub async fn wait_for_signal<F>(
    tap: &mut Subscription,
    timeout_ms: u64,
    predicate: F,
) -> Option<Signal>
where
    F: Fn(&Signal) -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
    loop {
        let frame = match tokio::time::timeout_at(deadline, tap.recv()).await {
            Ok(Some(frame)) => frame,
            Ok(None) | Err(_) => return None,
        };
        if let Some(signal) = frame.decode() {
            if predicate(&signal) {
                return Some(signal);
            }
        }
    }
}

/// Drain whatever arrives within the window and keep the decodable part.
pub async fn collect_signals(tap: &mut Subscription, window_ms: u64) -> Vec<Signal> {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(window_ms);
    let mut signals = Vec::new();
    while let Ok(Some(frame)) = tokio::time::timeout_at(deadline, tap.recv()).await {
        if let Some(signal) = frame.decode() {
            signals.push(signal);
        }
    }
    signals
}
