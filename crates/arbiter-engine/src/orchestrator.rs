// crates/arbiter-engine/src/orchestrator.rs
//
// Metric Orchestrator: runs every registered plugin concurrently against one
// shared, read-only metadata value and collects a complete ScoreReport.
//
// Each plugin runs as its own tokio task, so the pool is exactly as wide as
// the plugin set. A task that panics is replaced by the plugin's default
// result with 0 ms latency; the other plugins are unaffected.

use std::sync::Arc;
use std::time::Instant;

use arbiter_core::{DeviceScores, MetricContext, MetricPlugin, MetricResult, ScoreReport};

/// Clamp every scalar in a plugin result into [0, 1].
fn clamped(result: MetricResult) -> MetricResult {
    match result {
        MetricResult::Scalar(v) => MetricResult::scalar(v),
        MetricResult::PerDevice(devices) => {
            let mut out = DeviceScores::default();
            for (device, score) in devices.iter() {
                out.insert(device, score);
            }
            MetricResult::PerDevice(out)
        }
    }
}

/// Run all `plugins` against `ctx` and wait for every one of them.
///
/// The returned report has exactly one result and one latency per plugin
/// kind, whether or not the plugin completed.
pub async fn run_plugins(plugins: &[Arc<dyn MetricPlugin>], ctx: &MetricContext) -> ScoreReport {
    let mut handles = Vec::with_capacity(plugins.len());
    for plugin in plugins {
        let task_plugin = Arc::clone(plugin);
        let task_ctx = ctx.clone();
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            let result = task_plugin.compute(&task_ctx).await;
            (result, start.elapsed().as_millis() as u64)
        });
        handles.push((Arc::clone(plugin), handle));
    }

    let mut report = ScoreReport::new();
    for (plugin, handle) in handles {
        let kind = plugin.kind();
        match handle.await {
            Ok((result, latency_ms)) => {
                tracing::debug!("Metric {} finished in {} ms", kind, latency_ms);
                report.insert(kind, clamped(result), latency_ms);
            }
            Err(e) => {
                tracing::error!("Metric {} failed, substituting default: {}", kind, e);
                report.insert(kind, plugin.default_result(), 0);
            }
        }
    }
    report
}
