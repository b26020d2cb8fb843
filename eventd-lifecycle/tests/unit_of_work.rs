use anyhow::{Result as AnyResult, anyhow};
use eventd::prelude::*;
use eventd_lifecycle::{Ending, Lifecycle, LifecycleError};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, EventBody)]
struct ItemAdded {
    sku: String,
}

#[derive(Debug, Clone, PartialEq, EventBody)]
struct CartCheckedOut {
    items: usize,
}

#[derive(Clone, Default)]
struct Outbox {
    batches: Arc<Mutex<Vec<Vec<Event>>>>,
}

impl Outbox {
    fn lifecycle(&self) -> Lifecycle {
        let batches = self.batches.clone();
        Lifecycle::new(move |events: &[Event]| batches.lock().unwrap().push(events.to_vec()))
    }

    fn batches(&self) -> Vec<Vec<String>> {
        self.batches
            .lock()
            .unwrap()
            .iter()
            .map(|b| b.iter().map(|e| e.name().to_string()).collect())
            .collect()
    }
}

// 嵌套的领域逻辑：不知道生命周期的存在，只从上下文取发布能力
fn add_item(ctx: &Context, sku: &str) -> AnyResult<()> {
    let publisher = publisher_from_context(ctx).ok_or_else(|| anyhow!("no publisher"))?;
    publisher.publish_body(ItemAdded { sku: sku.into() });
    Ok(())
}

fn checkout(ctx: &Context, skus: &[&str], fail_on_save: bool) -> AnyResult<usize> {
    for sku in skus {
        add_item(ctx, sku)?;
    }
    eventd::require_publisher(ctx)?.publish_body(CartCheckedOut { items: skus.len() });
    if fail_on_save {
        return Err(anyhow!("save failed"));
    }
    Ok(skus.len())
}

#[test]
fn successful_unit_of_work_releases_events_in_order() {
    let outbox = Outbox::default();
    let lc = outbox.lifecycle();

    let outcome = checkout(lc.context(), &["a", "b"], false);
    assert_eq!(lc.end(&outcome), Ok(Ending::Committed(3)));

    assert_eq!(
        outbox.batches(),
        vec![vec!["ItemAdded", "ItemAdded", "CartCheckedOut"]]
    );
    let batches = outbox.batches.lock().unwrap();
    assert_eq!(
        batches[0][1].body_as::<ItemAdded>(),
        Some(&ItemAdded { sku: "b".into() })
    );
}

#[test]
fn failed_unit_of_work_releases_nothing() {
    let outbox = Outbox::default();
    let lc = outbox.lifecycle();

    let outcome = checkout(lc.context(), &["a"], true);
    assert!(outcome.is_err());
    assert_eq!(lc.end(&outcome), Ok(Ending::Discarded(2)));
    assert!(outbox.batches().is_empty());
}

#[test]
fn run_wraps_the_whole_unit_of_work() {
    let outbox = Outbox::default();

    let n = outbox
        .lifecycle()
        .run(|ctx| checkout(ctx, &["x"], false))
        .unwrap();
    assert_eq!(n, 1);

    let err = outbox
        .lifecycle()
        .run(|ctx| checkout(ctx, &["y"], true))
        .unwrap_err();
    assert_eq!(err.to_string(), "save failed");

    assert_eq!(outbox.batches(), vec![vec!["ItemAdded", "CartCheckedOut"]]);
}

#[test]
fn ending_twice_keeps_the_first_outcome() {
    let outbox = Outbox::default();
    let lc = outbox.lifecycle();
    add_item(lc.context(), "a").unwrap();

    assert_eq!(lc.rollback(), Ok(Ending::Discarded(1)));
    assert!(matches!(
        lc.commit(),
        Err(LifecycleError::AlreadyEnded { .. })
    ));
    assert!(outbox.batches().is_empty());
}

#[test]
fn subscribers_outside_the_lifecycle_are_not_involved() {
    let outbox = Outbox::default();
    let lc = outbox.lifecycle();

    let public_bus = Bus::new();
    let seen = Arc::new(Mutex::new(0_usize));
    let s = seen.clone();
    public_bus.subscribe(Arc::new(move |_: &Event| *s.lock().unwrap() += 1));

    add_item(lc.context(), "a").unwrap();
    lc.commit().unwrap();

    assert_eq!(*seen.lock().unwrap(), 0);
    assert_eq!(outbox.batches().len(), 1);
}
