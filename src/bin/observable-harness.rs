//! Manual harness that drives the registry and prints its counters.
//!
//! Registers the `{"*", "change", "create", "delete"}` vocabulary,
//! subscribes 100 wildcard and 100 "change" handlers, dispatches, then
//! churns one action through a grow/shrink cycle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::json;

use observable_core::{logging, Observable};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();
    println!("🧪 Observable registry harness");

    let mut observable: Observable<serde_json::Value> = Observable::new();
    observable
        .append_action_type("change")?
        .append_action_type("create")?
        .append_action_type("delete")?;

    let wildcard_hits = Arc::new(AtomicU64::new(0));
    let change_hits = Arc::new(AtomicU64::new(0));

    for _ in 0..100 {
        let hits = Arc::clone(&wildcard_hits);
        observable.subscribe(move |_| {
            hits.fetch_add(1, Ordering::Relaxed);
        });
        let hits = Arc::clone(&change_hits);
        observable.on("change", move |_| {
            hits.fetch_add(1, Ordering::Relaxed);
        })?;
    }

    println!("   - Wildcard subscribers: {}", observable.subscriber_count("*"));
    println!("   - 'change' subscribers: {}", observable.subscriber_count("change"));

    observable.push_action_update("change", &json!({"path": "/etc/app.toml", "kind": "modified"}))?;
    println!(
        "✅ push_action_update(\"change\"): {} change + {} wildcard invocations",
        change_hits.load(Ordering::Relaxed),
        wildcard_hits.load(Ordering::Relaxed),
    );

    observable.push_update(&json!({"reason": "sweep"}));
    println!(
        "✅ push_update: wildcard total now {}",
        wildcard_hits.load(Ordering::Relaxed),
    );

    // Grow past the initial 32 slots, then shrink back down to 2 survivors.
    let mut ids = Vec::new();
    for _ in 0..33 {
        ids.push(observable.on("create", |_| {})?);
    }
    for id in ids.drain(..31) {
        observable.unsubscribe(id);
    }
    println!(
        "✅ 'create' churn complete: {} subscribers remain",
        observable.subscriber_count("create"),
    );

    let stats = observable.stats();
    println!(
        "📊 {} actions, {} handlers, {} invocations",
        stats.total_actions, stats.total_handlers, stats.total_invocations,
    );
    println!("{}", serde_json::to_string_pretty(&stats.actions)?);

    println!("\n🎉 Harness run complete");
    Ok(())
}
