// SPDX-License-Identifier: MPL-2.0
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tempfile::tempdir;
use toastkit::config::{self, AutoCloseSetting, ContainerConfig};
use toastkit::notifications::{
    AutoClose, ContainerId, ContainerProps, Position, ToastContainer, ToastContent, ToastId,
    ToastOptions, Toaster, UpdateOptions,
};
use toastkit::scheduler::{driver, Scheduler};

fn mounted(props: ContainerProps) -> (Toaster, ToastContainer) {
    let toaster = Toaster::new();
    let container = toaster.container(props);
    container.mount();
    toaster.scheduler().run_pending();
    (toaster, container)
}

fn texts(container: &ToastContainer) -> Vec<String> {
    container
        .live_ids()
        .iter()
        .filter_map(|id| container.get_toast(id))
        .filter_map(|toast| toast.content.as_text().map(str::to_owned))
        .collect()
}

#[test]
fn live_order_follows_call_order_without_limit() {
    let (toaster, container) = mounted(ContainerProps::default());
    let ids: Vec<ToastId> = ["one", "two", "three"]
        .into_iter()
        .map(|text| toaster.show(text, ToastOptions::new()))
        .collect();
    toaster.scheduler().run_pending();

    assert_eq!(container.live_ids(), ids);
    assert_eq!(texts(&container), vec!["one", "two", "three"]);
}

#[test]
fn newest_on_top_reverses_render_order_only() {
    let (toaster, container) = mounted(ContainerProps::default().newest_on_top(true));
    let first = toaster.show("one", ToastOptions::new());
    let second = toaster.show("two", ToastOptions::new());
    toaster.scheduler().run_pending();

    assert_eq!(container.live_ids(), vec![first.clone(), second.clone()]);
    let groups = container.toasts_to_render();
    let rendered: Vec<ToastId> = groups[0].toasts.iter().map(|t| t.id().clone()).collect();
    assert_eq!(rendered, vec![second, first]);
}

#[test]
fn duplicate_show_is_rejected() {
    let (toaster, container) = mounted(ContainerProps::default());
    let t1 = toaster.show("A", ToastOptions::new().with_id("t1"));
    toaster.show("B", ToastOptions::new().with_id("t1"));
    toaster.scheduler().run_pending();

    assert_eq!(container.live_ids(), vec![t1]);
    assert_eq!(texts(&container), vec!["A"]);
}

#[test]
fn limit_holds_extra_toasts_and_promotes_fifo() {
    let (toaster, container) = mounted(ContainerProps::default().with_limit(2));
    let ids: Vec<ToastId> = (0..5)
        .map(|n| toaster.show(format!("toast {n}"), ToastOptions::new()))
        .collect();
    toaster.scheduler().run_pending();

    assert_eq!(container.live_count(), 2);
    assert_eq!(container.queued_ids(), ids[2..].to_vec());
    assert!(!toaster.is_active(&ids[2]));

    toaster.dismiss(Some(ids[0].clone()));
    toaster.scheduler().run_pending();
    assert_eq!(container.live_ids(), vec![ids[1].clone(), ids[2].clone()]);
    assert_eq!(container.queued_ids(), ids[3..].to_vec());
}

#[test]
fn limit_of_one_promotes_the_waiting_toast() {
    let (toaster, container) = mounted(ContainerProps::default().with_limit(1));
    let a = toaster.show("A", ToastOptions::new());
    let b = toaster.show("B", ToastOptions::new());
    toaster.scheduler().run_pending();
    assert_eq!(container.live_ids(), vec![a.clone()]);
    assert_eq!(container.queued_ids(), vec![b.clone()]);

    toaster.dismiss(Some(a));
    toaster.scheduler().run_pending();
    assert_eq!(container.live_ids(), vec![b]);
    assert!(container.queued_ids().is_empty());
}

#[test]
fn dismiss_all_clears_live_and_queue() {
    let (toaster, container) = mounted(ContainerProps::default().with_limit(1));
    for text in ["A", "B", "C"] {
        toaster.show(text, ToastOptions::new());
    }
    toaster.scheduler().run_pending();

    toaster.dismiss(None);
    toaster.scheduler().run_pending();
    assert_eq!(container.live_count(), 0);
    assert_eq!(container.queued_count(), 0);
}

#[test]
fn update_in_the_same_phase_as_show_applies() {
    let (toaster, container) = mounted(ContainerProps::default());
    let id = toaster.show("draft", ToastOptions::new());
    toaster.update(
        id.clone(),
        UpdateOptions::new()
            .render("final")
            .options(|options| options.with_position(Position::BottomLeft)),
    );
    toaster.scheduler().run_pending();

    assert_eq!(container.live_ids(), vec![id.clone()]);
    let toast = container.get_toast(&id).expect("live");
    assert_eq!(toast.content.as_text(), Some("final"));
    assert_eq!(toast.props.position, Position::BottomLeft);
}

#[test]
fn update_with_other_id_swaps_activity() {
    let (toaster, container) = mounted(ContainerProps::default());
    let old = toaster.show("A", ToastOptions::new().with_position(Position::TopCenter));
    toaster.scheduler().run_pending();

    toaster.update(old.clone(), ToastOptions::new().with_id("other").into());
    toaster.scheduler().run_pending();

    let other = ToastId::from("other");
    assert!(!toaster.is_active(&old));
    assert!(toaster.is_active(&other));
    let toast = container.get_toast(&other).expect("swapped");
    assert_eq!(toast.props.position, Position::TopCenter);
    assert_eq!(toast.content.as_text(), Some("A"));
}

#[test]
fn is_active_tracks_the_live_set_only() {
    let (toaster, _container) = mounted(ContainerProps::default().with_limit(1));
    let a = ToastId::from("a");
    let b = ToastId::from("b");
    assert!(!toaster.is_active(&a));

    toaster.show("A", ToastOptions::new().with_id("a"));
    toaster.show("B", ToastOptions::new().with_id("b"));
    toaster.scheduler().run_pending();
    assert!(toaster.is_active(&a));
    assert!(!toaster.is_active(&b));

    toaster.dismiss(Some(a.clone()));
    toaster.scheduler().run_pending();
    assert!(!toaster.is_active(&a));
    assert!(toaster.is_active(&b));
}

#[test]
fn change_listener_sees_counts_with_container_id() {
    let (toaster, _container) = mounted(ContainerProps::default().with_id("main"));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    toaster.on_change(move |count, container_id| {
        sink.borrow_mut().push((count, container_id.cloned()));
    });

    toaster.show("X", ToastOptions::new());
    toaster.scheduler().run_pending();
    toaster.dismiss(None);
    toaster.scheduler().run_pending();

    let main = Some(ContainerId::from("main"));
    assert_eq!(*seen.borrow(), vec![(1, main.clone()), (0, main)]);
}

#[test]
fn clear_without_containers_does_not_panic() {
    let toaster = Toaster::new();
    toaster.dismiss(Some("nothing".into()));
    toaster.dismiss(None);
    toaster.scheduler().run_until_idle();
    assert!(!toaster.is_any_container_mounted());
}

#[test]
fn multi_container_routing_by_id() {
    let toaster = Toaster::new();
    let left = toaster.container(ContainerProps::default().with_id("left").multi_container(true));
    let right = toaster.container(ContainerProps::default().with_id("right").multi_container(true));
    left.mount();
    right.mount();
    toaster.scheduler().run_pending();

    let id = toaster.show("routed", ToastOptions::new().with_container("right"));
    toaster.scheduler().run_pending();

    assert!(right.is_toast_active(&id));
    assert!(!left.is_toast_active(&id));
    assert!(toaster.is_active(&id));
}

#[test]
fn delayed_toast_appears_after_its_delay() {
    let (toaster, _container) = mounted(ContainerProps::default());
    let id = toaster.show(
        "later",
        ToastOptions::new().with_delay(Duration::from_millis(250)),
    );
    toaster.scheduler().run_pending();
    assert!(!toaster.is_active(&id));

    toaster.scheduler().advance(Duration::from_millis(250));
    assert!(toaster.is_active(&id));
}

#[test]
fn invalid_content_never_creates_a_toast() {
    let (toaster, container) = mounted(ContainerProps::default());
    let id = toaster.show(ToastContent::Empty, ToastOptions::new());
    toaster.scheduler().run_pending();

    assert!(!toaster.is_active(&id));
    assert!(container.get_toast(&id).is_none());
    assert!(toaster.try_show(None::<&str>, ToastOptions::new()).is_err());
}

#[test]
fn config_file_drives_container_props() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let path = temp_dir.path().join("toastkit").join("toasts.toml");
    let stored = ContainerConfig {
        limit: Some(1),
        auto_close: Some(AutoCloseSetting::Millis(1_000)),
        ..ContainerConfig::default()
    };
    config::save_to_path(&stored, &path).expect("failed to save config");

    let props = config::load_from_path(&path)
        .expect("failed to load config")
        .into_props();
    assert_eq!(props.auto_close, AutoClose::After(Duration::from_secs(1)));

    let (toaster, container) = mounted(props);
    let a = toaster.show("A", ToastOptions::new());
    let b = toaster.show("B", ToastOptions::new());
    toaster.scheduler().run_pending();
    assert_eq!(container.queued_ids(), vec![b.clone()]);

    toaster.scheduler().advance(Duration::from_secs(1));
    assert!(!toaster.is_active(&a));
    assert!(toaster.is_active(&b));
}

#[tokio::test(start_paused = true)]
async fn tokio_driver_runs_auto_close() {
    let scheduler = Rc::new(Scheduler::new());
    let toaster = Toaster::with_scheduler(scheduler.clone());
    let container = toaster.container(
        ContainerProps::default().with_auto_close(AutoClose::After(Duration::from_millis(800))),
    );
    container.mount();

    let id = toaster.show("tick", ToastOptions::new());
    driver::run_for(&scheduler, Duration::from_millis(100)).await;
    assert!(toaster.is_active(&id));

    driver::run_until_idle(&scheduler).await;
    assert!(!toaster.is_active(&id));
}
