// ============================================================================
// Basic Usage Example
// ============================================================================

use number_flow::prelude::*;
use std::time::Duration;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Number Flow Example ===\n");

    // Decompose a value into keyed parts
    let format = NumberFlowFormat::currency("USD");
    let data = decompose(1234.5, &format);
    println!("{}", data);
    for part in data.all_parts() {
        println!("  {:<12} {:?}", part.key().to_string(), part.text());
    }

    // Drive a counter through a carry
    println!("\n=== Counter 998 -> 1,001 ===");
    let mut flow = NumberFlow::new(998.0, NumberFlowFormat::default());
    let mut renderer = RecordingRenderer::default();
    flow.mount(&mut renderer);
    renderer.take_instructions();

    for (tick, value) in [999.0, 1000.0, 1001.0].into_iter().enumerate() {
        let now = Duration::from_millis(tick as u64 * 1000);
        let diff = flow.set_value(value, now, &mut renderer);
        println!(
            "\n{} (added {}, removed {}, rolled {})",
            flow.data().rendered_text(),
            diff.added.len(),
            diff.removed.len(),
            diff.updated.len()
        );
        for instruction in renderer.take_instructions() {
            println!("  {:?}", instruction);
        }

        // A real renderer reports completion when the spring settles
        for update in &diff.updated {
            flow.roll_finished(update.key, &mut renderer);
        }
        renderer.take_instructions();
    }

    // Trend control
    println!("\n=== Trends ===");
    let previous = decompose(3.0, &NumberFlowFormat::default());
    let next = decompose(8.0, &NumberFlowFormat::default());
    for trend in [NumberFlowTrend::Auto, NumberFlowTrend::Down] {
        let diff = reconcile(&previous, &next, &trend);
        let update = &diff.updated[0];
        let steps = compute_delta(i32::from(update.new) - 3, update.direction);
        println!("  {:?}: 3 -> 8 rolls {} steps", trend, steps);
    }

    // Logging renderer prints instructions through tracing
    let mut logging = LoggingRenderer;
    let mut percent = NumberFlow::new(0.25, NumberFlowFormat::percent());
    percent.mount(&mut logging);
    percent.set_value(0.5, Duration::ZERO, &mut logging);
    println!("\nPercent: {}", percent.accessibility_label());
}
