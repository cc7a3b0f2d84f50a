//! Live statistics refresh

use std::time::Duration;

use minihub_sdk::format::{format_timestamp, now_ms};
use minihub_sdk::{MiniHub, Statistics};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::stats::render_statistics;
use super::Context;
use crate::CliError;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

pub async fn execute(ctx: &Context, interval_secs: u64) -> Result<(), CliError> {
    if interval_secs == 0 {
        return Err(CliError::InvalidInput("interval must be at least 1 second".into()));
    }

    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let json = ctx.json;
    let period = Duration::from_secs(interval_secs);
    let polls = run_until_cancelled(&ctx.hub, period, token, |stats| {
        if json {
            if let Ok(line) = serde_json::to_string(stats) {
                println!("{}", line);
            }
        } else {
            print!("{}", CLEAR_SCREEN);
            println!("{}", render_statistics(stats));
            println!(
                "\nUpdated {}. Refreshing every {}s, press Ctrl+C to stop.",
                format_timestamp(now_ms()),
                interval_secs
            );
        }
    })
    .await;

    tracing::info!(polls, "monitor stopped");
    Ok(())
}

/// Poll statistics every `period` until `token` is cancelled, calling
/// `on_frame` after each successful poll. Failed polls are logged and
/// skipped. Returns the number of polls attempted.
///
/// A poll in flight is abandoned on cancellation. Ticks missed during a
/// slow poll are not replayed; the next poll waits a full `period`.
pub async fn run_until_cancelled<F>(
    hub: &MiniHub,
    period: Duration,
    token: CancellationToken,
    mut on_frame: F,
) -> usize
where
    F: FnMut(&Statistics),
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut polls = 0;
    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        polls += 1;
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!(polls, "poll abandoned on cancel");
                break;
            }
            result = hub.get_statistics() => match result {
                Ok(stats) => on_frame(&stats),
                Err(e) => tracing::error!(error = %e, "failed to refresh statistics"),
            },
        }
    }
    polls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{config, context, seed_jobs};
    use async_trait::async_trait;
    use minihub_sdk::{MockTransport, SdkError, SuiClient, Transport};
    use serde_json::Value;

    /// Transport whose requests never complete
    struct StalledTransport;

    #[async_trait]
    impl Transport for StalledTransport {
        async fn request_json(
            &self,
            _method: &str,
            _params: Vec<Value>,
        ) -> Result<Value, SdkError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_monitor_stops_on_cancel() {
        let mock = MockTransport::new();
        seed_jobs(&mock, &[("0x10", "Dev", 0, None, 4_000_000_000_000)]);
        let ctx = context(&mock);

        let token = CancellationToken::new();
        let canceller = token.clone();
        let mut frames = Vec::new();

        let (polls, _) = tokio::join!(
            run_until_cancelled(&ctx.hub, Duration::from_millis(10), token, |s| {
                frames.push(s.total_jobs)
            }),
            async move {
                tokio::time::sleep(Duration::from_millis(55)).await;
                canceller.cancel();
            }
        );

        assert!(polls >= 1);
        assert!(!frames.is_empty());
        assert!(frames.iter().all(|n| *n == 1));
    }

    #[tokio::test]
    async fn test_monitor_survives_poll_errors() {
        let mock = MockTransport::new();
        mock.set_response("sui_getObject", serde_json::json!(42));
        let ctx = context(&mock);

        let token = CancellationToken::new();
        token.cancel();
        let polls = run_until_cancelled(&ctx.hub, Duration::from_millis(5), token, |_| {}).await;
        assert_eq!(polls, 0);

        let token = CancellationToken::new();
        let canceller = token.clone();
        let mut frames = 0;
        let (polls, _) = tokio::join!(
            run_until_cancelled(&ctx.hub, Duration::from_millis(10), token, |_| frames += 1),
            async move {
                tokio::time::sleep(Duration::from_millis(45)).await;
                canceller.cancel();
            }
        );
        assert!(polls >= 1);
        assert_eq!(frames, 0);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_stalled_poll() {
        let client = SuiClient::with_transport(StalledTransport);
        let ctx = Context::with_client(config(), client, false).unwrap();

        let token = CancellationToken::new();
        let canceller = token.clone();
        let mut frames = 0;
        let (polls, _) = tokio::join!(
            tokio::time::timeout(
                Duration::from_secs(5),
                run_until_cancelled(&ctx.hub, Duration::from_millis(10), token, |_| frames += 1),
            ),
            async move {
                tokio::time::sleep(Duration::from_millis(30)).await;
                canceller.cancel();
            }
        );

        assert_eq!(polls.expect("monitor ignored cancellation"), 1);
        assert_eq!(frames, 0);
    }
}
