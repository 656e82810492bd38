//! Headless driver for the page effects
//!
//! Steps the particle field against an in-memory surface and scrolls a
//! synthetic page through the reveal tracker.
//!
//! Run with: cargo run --features cli --bin fx-cli
//!
//! Environment:
//! - `FX_WIDTH` / `FX_HEIGHT`: viewport (default 1024x768)
//! - `FX_SEED`: particle seed
//! - `FX_FRAMES`: run this many frames flat out and exit; otherwise run
//!   at 60 Hz until Ctrl-C
//! - `FX_CONFIG`: path to an `EffectsConfig` JSON file

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use portfolio_fx::core::{
        EffectsConfig, FrameRecorder, FrameStats, IntersectionEntry, ParticleField, Rect, Viewport,
        VisibilityTracker,
    };
    use portfolio_fx::time::{now_millis, FrameMeter, FRAME_BUDGET_MS};
    use std::time::Duration;
    use tracing::{debug, info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,portfolio_fx=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let mut config = match std::env::var("FX_CONFIG") {
        Ok(path) => {
            info!(path = %path, "Loading config");
            EffectsConfig::from_json(&std::fs::read_to_string(&path)?)?
        }
        Err(_) => EffectsConfig::default(),
    };
    if let Some(seed) = env_parse::<u64>("FX_SEED") {
        config.field.seed = Some(seed);
    }
    let width = env_parse::<f64>("FX_WIDTH").unwrap_or(1024.0);
    let height = env_parse::<f64>("FX_HEIGHT").unwrap_or(768.0);

    let mut field = ParticleField::new(config.field.clone(), width, height);
    let mut surface = FrameRecorder::new(width, height);
    let mut meter = FrameMeter::default();

    // Synthetic page: five stacked sections below the hero
    let viewport = Viewport::new(width, height);
    let sections: Vec<(String, Rect)> = ["hero", "work", "about", "services", "contact"]
        .iter()
        .enumerate()
        .map(|(i, id)| (id.to_string(), Rect::new(0.0, i as f64 * height, width, height * 0.8)))
        .collect();
    let page_height = sections.len() as f64 * height;
    let mut tracker = VisibilityTracker::new(config.reveal.clone());
    for (id, _) in &sections {
        tracker.observe(id.as_str());
    }
    let mut scroll_y = 0.0;
    let mut scroll_step = 6.0;

    let mut scroll = |tracker: &mut VisibilityTracker| {
        let entries: Vec<IntersectionEntry> = sections
            .iter()
            .map(|(id, rect)| {
                let rect = rect.scrolled(scroll_y);
                IntersectionEntry::measure(id.as_str(), &rect, &viewport, tracker.config())
            })
            .collect();
        for transition in tracker.apply(&entries) {
            info!(id = %transition.id, visible = transition.visible, scroll_y, "Reveal");
        }
        scroll_y += scroll_step;
        if scroll_y <= 0.0 || scroll_y >= page_height - height {
            scroll_step = -scroll_step;
        }
    };

    info!(
        particles = field.particles().len(),
        width,
        height,
        pairs = config.field.pairs_per_frame(),
        "Particle field ready"
    );

    if let Some(frames) = env_parse::<u64>("FX_FRAMES") {
        let start = now_millis();
        let mut last = FrameStats::default();
        for _ in 0..frames {
            last = field.step(&mut surface);
            scroll(&mut tracker);
        }
        let elapsed = now_millis() - start;
        let out_of_bounds = field
            .particles()
            .iter()
            .filter(|p| p.x < 0.0 || p.x > width || p.y < 0.0 || p.y > height)
            .count();
        info!(
            frames,
            discs = last.discs,
            lines = last.lines,
            draw_calls = last.draw_calls(),
            out_of_bounds,
            ms_per_frame = format!("{:.3}", elapsed / frames.max(1) as f64),
            visible = ?tracker.snapshot(),
            "Done"
        );
        tracker.dispose();
        return Ok(());
    }

    let frame_period = Duration::from_secs_f64(FRAME_BUDGET_MS / 1000.0);
    let mut frame_interval = tokio::time::interval(frame_period);
    let mut stats_interval = tokio::time::interval(Duration::from_secs(5));
    let mut lines_total = 0u64;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                let start = now_millis();
                let stats = field.step(&mut surface);
                scroll(&mut tracker);
                if meter.record(start, now_millis() - start) {
                    warn!(worst_ms = meter.worst_ms(), "Frame over budget");
                }
                lines_total += stats.lines as u64;
            }
            _ = stats_interval.tick() => {
                info!(
                    frames = meter.frames(),
                    fps = format!("{:.1}", meter.fps()),
                    lines = surface.lines(),
                    avg_lines = format!("{:.1}", lines_total as f64 / meter.frames().max(1) as f64),
                    visible = tracker.visible_count(),
                    "stats"
                );
            }
            _ = &mut ctrl_c => {
                debug!("Interrupted");
                break;
            }
        }
    }

    tracker.dispose();
    info!(frames = meter.frames(), overruns = meter.over_budget(), "Stopped");
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
