//! Scenario tests for the navigation controller.

#[cfg(test)]
mod tests {
    use crate::catalog::windows_boot;
    use crate::config::TimelineConfig;
    use crate::core::event::{
        AUTOPLAY_STARTED, AUTOPLAY_STOPPED, INSPECT_FALLBACK, RESIDENT_RESET, STAGE_ENTERED,
    };
    use crate::core::{LocationKind, OriginKind};
    use crate::errors::TimelineError;
    use crate::inspection::InspectTarget;
    use crate::navigation::TimelineController;
    use crate::testing::{linear_catalog, two_stage_catalog, RecordingDialog, TestTimeline};
    use crate::transfer::AnchorKind;
    use crate::view::{MockPresentationSink, ViewModel};
    use pretty_assertions::assert_eq;
    use std::sync::{mpsc, Arc};
    use std::time::{Duration, Instant};

    fn labels(view: &ViewModel) -> Vec<String> {
        view.resident.iter().map(|a| a.label.clone()).collect()
    }

    fn windows() -> TestTimeline {
        TestTimeline::new(windows_boot()).unwrap()
    }

    #[test]
    fn test_build_renders_first_stage() {
        let t = windows();
        assert_eq!(t.views.len(), 1);
        let view = t.views.last().unwrap();
        assert_eq!(view.stage_index, 0);
        assert!(view.resident.is_empty());
        assert!(view.transfers.is_empty());
        assert_eq!(view.step_label(), "Step 1/8");
        assert_eq!(t.events.events_of_type(STAGE_ENTERED).len(), 1);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let err = TestTimeline::with_config(
            windows_boot(),
            TimelineConfig::new().with_autoplay_interval_ms(0),
        )
        .unwrap_err();
        assert!(matches!(err, TimelineError::Config(_)));
    }

    #[test]
    fn test_go_to_clamps() {
        let t = windows();
        let last = t.controller.stage_count() - 1;
        for requested in [-10_i64, -1, 0, 3, 7, 8, 1_000] {
            t.controller.go_to(requested);
            let expected = usize::try_from(requested.clamp(0, 7)).unwrap();
            assert_eq!(t.controller.current_index(), expected.min(last));
        }
    }

    #[test]
    fn test_resident_size_never_decreases_going_forward() {
        let t = windows();
        let mut previous = 0;
        for i in 0..8 {
            t.controller.go_to(i);
            let size = t.controller.resident_snapshot().len();
            assert!(size >= previous);
            previous = size;
        }
        assert_eq!(previous, 13);
    }

    #[test]
    fn test_two_stage_scenario() {
        let t = TestTimeline::new(two_stage_catalog().unwrap()).unwrap();
        t.controller.go_to(0);
        t.controller.go_to(1);

        let view = t.views.last().unwrap();
        assert_eq!(labels(&view), vec!["bootmgfw.efi", "BCD store"]);
        let delays: Vec<u64> = view.transfers.iter().map(|i| i.delay_ms).collect();
        assert_eq!(delays, vec![0, 120]);
        for instruction in &view.transfers {
            assert_eq!(instruction.source_anchor, AnchorKind::EspPartition);
            assert_eq!(instruction.destination_anchor, AnchorKind::ResidentArea);
        }
        assert!(view.indicators.secure_boot && view.indicators.tpm);
    }

    #[test]
    fn test_next_at_final_index_is_silent() {
        let t = windows();
        t.controller.go_to(7);
        let renders = t.views.len();
        let resident = t.controller.resident_snapshot();

        t.controller.next();

        assert_eq!(t.controller.current_index(), 7);
        assert_eq!(t.views.len(), renders);
        assert_eq!(t.controller.resident_snapshot(), resident);
    }

    #[test]
    fn test_previous_at_first_index_is_silent() {
        let t = windows();
        t.controller.previous();
        assert_eq!(t.controller.current_index(), 0);
        assert_eq!(t.views.len(), 1);
    }

    #[test]
    fn test_go_to_same_index_rerenders_with_empty_delta() {
        let t = windows();
        t.controller.go_to(4);
        assert_eq!(t.views.last().unwrap().transfers.len(), 4);

        t.controller.go_to(4);
        let view = t.views.last().unwrap();
        assert_eq!(t.views.len(), 3);
        assert_eq!(view.stage_index, 4);
        assert!(view.transfers.is_empty());
    }

    #[test]
    fn test_retreat_keeps_resident_set() {
        let t = windows();
        t.controller.go_to(4);
        let loaded = t.controller.resident_snapshot().len();

        t.controller.previous();
        t.controller.go_to(0);

        assert_eq!(t.controller.resident_snapshot().len(), loaded);
        let view = t.views.last().unwrap();
        assert_eq!(view.resident.len(), loaded);
        assert!(view.transfers.is_empty());
    }

    #[test]
    fn test_jump_skipping_stages_only_merges_target() {
        let t = windows();
        t.controller.go_to(3);
        assert_eq!(
            labels(&t.views.last().unwrap()),
            vec!["BCD store".to_string()]
        );
    }

    #[test]
    fn test_kernel_stage_keeps_per_artifact_origin() {
        let t = windows();
        t.controller.go_to(5);
        let view = t.views.last().unwrap();
        assert_eq!(view.focus_label(), "Focus: Windows");
        assert!(view.transfers.iter().all(|i| i.origin == OriginKind::Resident));
        assert_eq!(view.indicators.controller.name, "Windows kernel (ntoskrnl.exe)");
        assert!(!view.indicators.secure_boot);
    }

    #[test]
    fn test_reset_clears_residency() {
        let t = windows();
        t.controller.go_to(6);
        t.controller.reset();

        let view = t.views.last().unwrap();
        assert_eq!(view.stage_index, 0);
        assert!(view.resident.is_empty());
        assert_eq!(t.events.events_of_type(RESIDENT_RESET).len(), 1);

        t.controller.go_to(2);
        assert_eq!(t.views.last().unwrap().transfers.len(), 1);
    }

    #[test]
    fn test_view_does_not_merge() {
        let t = windows();
        let view = t.controller.view();
        assert_eq!(view.stage_index, 0);
        assert_eq!(t.views.len(), 1);
        assert!(t.controller.resident_snapshot().is_empty());
    }

    #[test]
    fn test_sessions_are_independent() {
        let a = windows();
        let b = windows();
        a.controller.go_to(4);
        assert_ne!(a.controller.session_id(), b.controller.session_id());
        assert_eq!(b.controller.current_index(), 0);
        assert!(b.controller.resident_snapshot().is_empty());
    }

    #[test]
    fn test_start_autoplay_requires_runtime() {
        let t = windows();
        let err = t.controller.start_autoplay(Duration::from_millis(10)).unwrap_err();
        assert!(matches!(err, TimelineError::NoRuntime));
        assert!(!t.controller.is_autoplay_active());
    }

    #[test]
    fn test_unknown_label_inspection_falls_back() {
        let t = windows();
        let detail = t.controller.inspect_artifact("pagefile.sys");
        assert_eq!(detail.location.kind, LocationKind::Generic);
        assert_eq!(t.events.events_of_type(INSPECT_FALLBACK).len(), 1);

        let known = t.controller.inspect_artifact("HAL");
        assert_eq!(known.location.kind, LocationKind::Windows);
        assert_eq!(t.events.events_of_type(INSPECT_FALLBACK).len(), 1);
    }

    #[test]
    fn test_inspect_into_opens_dialog() {
        let t = windows();
        let dialog = RecordingDialog::new();
        t.controller.inspect_into(&dialog, &InspectTarget::Stage(1));
        assert!(dialog.is_open());
        assert_eq!(dialog.opened()[0].title, "🧠 UEFI firmware - Checks + finds boot entry");
        assert!(t.events.events_of_type(INSPECT_FALLBACK).is_empty());
    }

    #[test]
    fn test_inspect_into_reports_generic_tagged_boxes() {
        let t = windows();
        let dialog = RecordingDialog::new();
        let untagged = InspectTarget::Tagged {
            title: "Fast startup".to_string(),
            body: "Hibernated kernel session".to_string(),
            tag: None,
        };
        let detail = t.controller.inspect_into(&dialog, &untagged);
        assert_eq!(detail.location.kind, LocationKind::Generic);

        let unknown = InspectTarget::Tagged {
            title: "Boot sector".to_string(),
            body: "Legacy BIOS only".to_string(),
            tag: Some("floppy".to_string()),
        };
        t.controller.inspect_into(&dialog, &unknown);

        let known = InspectTarget::Tagged {
            title: "TPM".to_string(),
            body: "Security chip".to_string(),
            tag: Some("ESP".to_string()),
        };
        t.controller.inspect_into(&dialog, &known);
        t.controller
            .inspect_into(&dialog, &InspectTarget::Artifact("pagefile.sys".to_string()));

        let fallbacks = t.events.events_of_type(INSPECT_FALLBACK);
        let keys: Vec<_> = fallbacks.iter().map(|e| e.data.get("key").cloned()).collect();
        assert_eq!(
            keys,
            vec![
                Some(serde_json::json!("Fast startup")),
                Some(serde_json::json!("floppy")),
                Some(serde_json::json!("pagefile.sys")),
            ]
        );
        assert_eq!(dialog.opened().len(), 4);
    }

    #[test]
    fn test_inspect_resident_uses_stored_record() {
        let t = windows();
        t.controller.go_to(5);
        let detail = t.controller.inspect_resident("Driver init");
        assert_eq!(detail.location.kind, LocationKind::Resident);
        assert_eq!(detail.body, "Drivers start and hardware becomes usable.");
    }

    #[test]
    fn test_sink_may_reenter_controller() {
        struct Reentrant {
            controller: parking_lot::Mutex<Option<TimelineController>>,
            seen: parking_lot::Mutex<Vec<usize>>,
        }
        impl crate::view::PresentationSink for Reentrant {
            fn render(&self, _view: &ViewModel) {
                if let Some(controller) = self.controller.lock().as_ref() {
                    self.seen.lock().push(controller.current_index());
                }
            }
        }

        let sink = Arc::new(Reentrant {
            controller: parking_lot::Mutex::new(None),
            seen: parking_lot::Mutex::new(Vec::new()),
        });
        let controller = TimelineController::builder(Arc::new(windows_boot()))
            .presentation_sink(sink.clone())
            .build()
            .unwrap();
        *sink.controller.lock() = Some(controller.clone());

        controller.go_to(2);
        assert_eq!(*sink.seen.lock(), vec![2]);
        sink.controller.lock().take();
    }

    #[test]
    fn test_mock_sink_receives_one_render_per_transition() {
        let mut sink = MockPresentationSink::new();
        sink.expect_render().times(3).return_const(());

        let controller = TimelineController::builder(Arc::new(windows_boot()))
            .presentation_sink(Arc::new(sink))
            .build()
            .unwrap();
        controller.next();
        controller.previous();
        controller.previous();
    }

    #[test]
    fn test_view_revisions_increase_per_transition() {
        let t = windows();
        t.controller.next();
        t.controller.refresh();
        t.controller.go_to(4);
        t.controller.reset();

        let revisions: Vec<u64> = t.views.views().iter().map(|v| v.revision).collect();
        assert_eq!(revisions, vec![1, 2, 3, 4, 5]);
        assert_eq!(t.controller.view().revision, 5);
    }

    /// Presentation sink that blocks inside the first render of `hold_index`
    /// until released, recording each index once its render returns.
    struct GatedSink {
        hold_index: usize,
        entered: parking_lot::Mutex<Option<mpsc::Sender<()>>>,
        release: parking_lot::Mutex<mpsc::Receiver<()>>,
        rendered: parking_lot::Mutex<Vec<usize>>,
    }

    impl crate::view::PresentationSink for GatedSink {
        fn render(&self, view: &ViewModel) {
            if view.stage_index == self.hold_index {
                if let Some(entered) = self.entered.lock().take() {
                    entered.send(()).unwrap();
                    self.release
                        .lock()
                        .recv_timeout(Duration::from_secs(5))
                        .unwrap();
                }
            }
            self.rendered.lock().push(view.stage_index);
        }
    }

    #[test]
    fn test_slow_autoplay_render_never_overwrites_user_jump() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .build()
            .unwrap();
        let _guard = runtime.enter();

        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let sink = Arc::new(GatedSink {
            hold_index: 1,
            entered: parking_lot::Mutex::new(Some(entered_tx)),
            release: parking_lot::Mutex::new(release_rx),
            rendered: parking_lot::Mutex::new(Vec::new()),
        });
        let controller = TimelineController::builder(Arc::new(linear_catalog(5).unwrap()))
            .presentation_sink(sink.clone())
            .build()
            .unwrap();
        controller.start_autoplay(Duration::from_millis(5)).unwrap();

        // The timer thread is now parked inside the render of stage 1.
        entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let user = {
            let controller = controller.clone();
            std::thread::spawn(move || controller.go_to(0))
        };
        let deadline = Instant::now() + Duration::from_secs(5);
        while controller.current_index() != 0 {
            assert!(Instant::now() < deadline, "user jump never committed");
            std::thread::sleep(Duration::from_millis(1));
        }

        release_tx.send(()).unwrap();
        user.join().unwrap();

        assert_eq!(controller.current_index(), 0);
        assert!(!controller.is_autoplay_active());
        assert_eq!(*sink.rendered.lock(), vec![0, 1, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_advances_and_stops_at_last_stage() {
        let t = TestTimeline::new(linear_catalog(3).unwrap()).unwrap();
        t.controller.start_autoplay(Duration::from_millis(100)).unwrap();
        assert!(t.controller.is_autoplay_active());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(t.controller.current_index(), 1);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(t.controller.current_index(), 2);
        assert!(!t.controller.is_autoplay_active());
        assert_eq!(t.views.rendered_indices(), vec![0, 1, 2]);
        assert!(!t.views.last().unwrap().autoplay_active);

        let stops = t.events.events_of_type(AUTOPLAY_STOPPED);
        assert_eq!(stops.len(), 1);
        assert_eq!(
            stops[0].data.get("reason"),
            Some(&serde_json::json!("final_stage"))
        );

        // Restarting after the run ended reports only the final stage.
        t.controller.start_autoplay(Duration::from_millis(100)).unwrap();
        let stops = t.events.events_of_type(AUTOPLAY_STOPPED);
        assert_eq!(stops.len(), 2);
        assert_eq!(
            stops[1].data.get("reason"),
            Some(&serde_json::json!("final_stage"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_at_last_index_self_stops() {
        let t = windows();
        t.controller.go_to(7);
        let renders = t.views.len();

        t.controller.start_autoplay(Duration::from_millis(100)).unwrap();
        assert!(!t.controller.is_autoplay_active());

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert_eq!(t.views.len(), renders);
        assert_eq!(t.controller.current_index(), 7);
        assert!(t.events.events_of_type(AUTOPLAY_STARTED).is_empty());
        let stops = t.events.events_of_type(AUTOPLAY_STOPPED);
        assert_eq!(stops.len(), 1);
        assert_eq!(
            stops[0].data.get("reason"),
            Some(&serde_json::json!("final_stage"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_user_navigation_cancels_autoplay() {
        let t = windows();
        t.controller.start_autoplay(Duration::from_millis(100)).unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(t.controller.current_index(), 1);

        t.controller.go_to(0);
        assert!(!t.controller.is_autoplay_active());

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert_eq!(t.controller.current_index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_keeps_autoplay_running() {
        let t = windows();
        t.controller.start_autoplay(Duration::from_millis(100)).unwrap();
        t.controller.refresh();
        assert!(t.controller.is_autoplay_active());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(t.controller.current_index(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_does_not_duplicate_timers() {
        let t = windows();
        t.controller.start_autoplay(Duration::from_millis(100)).unwrap();
        t.controller.start_autoplay(Duration::from_millis(100)).unwrap();

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(t.controller.current_index(), 2);
        assert_eq!(t.events.events_of_type(AUTOPLAY_STARTED).len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_autoplay_is_idempotent() {
        let t = windows();
        t.controller.stop_autoplay();
        assert!(t.events.events_of_type(AUTOPLAY_STOPPED).is_empty());

        t.controller.play().unwrap();
        t.controller.stop_autoplay();
        t.controller.stop_autoplay();
        assert_eq!(t.events.events_of_type(AUTOPLAY_STOPPED).len(), 1);

        tokio::time::sleep(Duration::from_millis(5_000)).await;
        assert_eq!(t.controller.current_index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_uses_configured_interval() {
        let t = TestTimeline::with_config(
            windows_boot(),
            TimelineConfig::new().with_autoplay_interval_ms(1_000),
        )
        .unwrap();
        t.controller.play().unwrap();

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert_eq!(t.controller.current_index(), 0);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(t.controller.current_index(), 1);
        t.controller.stop_autoplay();
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_controller_ends_autoplay() {
        let t = windows();
        let views = t.views.clone();
        t.controller.start_autoplay(Duration::from_millis(100)).unwrap();
        drop(t);

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert_eq!(views.len(), 1);
    }
}
