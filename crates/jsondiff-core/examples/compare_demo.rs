//! Demo of structural comparison
//!
//! This example demonstrates:
//! - Comparing two documents into a difference tree
//! - Rollup counts and the rendered tree
//! - Filtering and collapsing during rendering
//! - Cycle detection on a self-referential value

use jsondiff_core::{compare, render_counts, render_tree, Object, RenderOptions, Value};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ═══════════════════════════════════════════════════════════
    // SECTION 1: Compare two service descriptions
    // ═══════════════════════════════════════════════════════════
    println!("SECTION 1: Full difference tree\n");

    let left = Value::from(json!({
        "name": "billing",
        "replicas": 2,
        "ports": [80, 443],
        "env": {"LOG_LEVEL": "info", "REGION": "eu-west-1"}
    }));
    let right = Value::from(json!({
        "name": "billing",
        "replicas": 3,
        "ports": [80],
        "env": {"LOG_LEVEL": "debug", "REGION": "eu-west-1", "TRACE": true}
    }));

    let summary = compare(&left, &right)?;
    println!("{}", render_counts(&summary));
    print!("{}", render_tree(&summary, &RenderOptions::default()));

    // ═══════════════════════════════════════════════════════════
    // SECTION 2: Presentation options
    // ═══════════════════════════════════════════════════════════
    println!("\nSECTION 2: Only differences, filtered by 'log'\n");

    let options = RenderOptions::default()
        .with_only_differences(true)
        .with_filter("log");
    print!("{}", render_tree(&summary, &options));

    println!("\nSECTION 2b: Collapsed below the first level\n");
    print!("{}", render_tree(&summary, &RenderOptions::default().with_max_depth(0)));

    // ═══════════════════════════════════════════════════════════
    // SECTION 3: Cycle detection
    // ═══════════════════════════════════════════════════════════
    println!("\nSECTION 3: Self-referential input\n");

    let cyclic = Object::new();
    cyclic.insert("self", Value::Object(cyclic.clone()));
    match compare(&left, &Value::Object(cyclic)) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("rejected: {}", err),
    }

    Ok(())
}
