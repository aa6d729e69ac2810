use std::collections::HashMap;
use std::sync::Arc;

use agoat::application::{
    gate::GateSettings,
    pipeline::{PREVIEW_TRUNCATED_METRIC, PreviewPipeline, RENDER_FALLBACK_METRIC},
    render::{MarkdownRenderer, RenderError},
};
use agoat::domain::viewer::ViewerContext;
use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};

struct BrokenRenderer;

impl MarkdownRenderer for BrokenRenderer {
    fn render(&self, _markdown: &str) -> Result<String, RenderError> {
        Err(RenderError::markdown("renderer unavailable"))
    }
}

fn counters(snapshotter: &Snapshotter) -> HashMap<String, u64> {
    snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter_map(|(composite_key, _, _, value)| match value {
            DebugValue::Counter(count) => Some((composite_key.key().name().to_string(), count)),
            _ => None,
        })
        .collect()
}

#[test]
fn truncation_and_fallback_are_counted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let pipeline = PreviewPipeline::with_default_renderer(GateSettings::default());
        pipeline
            .render(&"x".repeat(400), &ViewerContext::for_list(false))
            .expect("truncated preview");
        pipeline
            .render("short", &ViewerContext::for_list(false))
            .expect("short preview");

        let broken = PreviewPipeline::new(Arc::new(BrokenRenderer), GateSettings::default());
        broken
            .render(&"y".repeat(900), &ViewerContext::for_single(false))
            .expect("fallback preview");
    });

    let counters = counters(&snapshotter);
    assert_eq!(counters.get(PREVIEW_TRUNCATED_METRIC), Some(&2));
    assert_eq!(counters.get(RENDER_FALLBACK_METRIC), Some(&1));
}

#[test]
fn authenticated_previews_record_nothing() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let pipeline = PreviewPipeline::with_default_renderer(GateSettings::default());
        pipeline
            .render(&"x".repeat(400), &ViewerContext::for_list(true))
            .expect("full preview");
    });

    let counters = counters(&snapshotter);
    assert!(!counters.contains_key(PREVIEW_TRUNCATED_METRIC));
    assert!(!counters.contains_key(RENDER_FALLBACK_METRIC));
}
