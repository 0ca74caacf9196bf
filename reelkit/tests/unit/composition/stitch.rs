use super::*;

fn clip(kind: MediaKind, dur: u64) -> MediaItem {
    MediaItem {
        kind,
        src: format!("/data/media/{dur}.mp4"),
        duration_in_frames: dur,
    }
}

#[test]
fn total_duration_subtracts_overlaps() {
    assert_eq!(calculate_total_duration(&[], 15), 0);
    assert_eq!(calculate_total_duration(&[clip(MediaKind::Video, 90)], 15), 90);
    assert_eq!(
        calculate_total_duration(
            &[clip(MediaKind::Video, 195), clip(MediaKind::Image, 150)],
            15
        ),
        330
    );
}

#[test]
fn total_duration_saturates_at_zero() {
    let items = [clip(MediaKind::Image, 5), clip(MediaKind::Image, 5)];
    assert_eq!(calculate_total_duration(&items, 100), 0);
}

#[test]
fn schedule_overlaps_consecutive_items() {
    let items = [
        clip(MediaKind::Video, 195),
        clip(MediaKind::Image, 150),
        clip(MediaKind::Video, 60),
    ];
    let timed = schedule_media(&items, 15);
    let spans: Vec<_> = timed.iter().map(|t| (t.start_frame, t.end_frame)).collect();
    assert_eq!(spans, vec![(0, 195), (180, 330), (315, 375)]);
    assert_eq!(timed[2].end_frame, calculate_total_duration(&items, 15));
}

#[test]
fn single_item_is_never_in_transition() {
    let timed = schedule_media(&[clip(MediaKind::Image, 30)], 15);
    for f in 0..30 {
        let active = active_media(&timed, 15, &TransitionKind::Crossfade, FrameIndex(f));
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].progress, 0.0);
        assert!(!active[0].is_outgoing);
        assert_eq!(active[0].style, TransitionStyle::IDENTITY);
    }
    assert!(active_media(&timed, 15, &TransitionKind::Crossfade, FrameIndex(30)).is_empty());
}

#[test]
fn overlap_window_has_two_active_items() {
    let items = [clip(MediaKind::Video, 195), clip(MediaKind::Image, 150)];
    let timed = schedule_media(&items, 15);

    let solo = active_media(&timed, 15, &TransitionKind::Crossfade, FrameIndex(100));
    assert_eq!(solo.len(), 1);
    assert_eq!(solo[0].index, 0);

    let both = active_media(&timed, 15, &TransitionKind::Crossfade, FrameIndex(185));
    assert_eq!(both.len(), 2);
    assert!(!both.spilled());
    let (out, inc) = (&both[0], &both[1]);
    assert_eq!(out.index, 0);
    assert!(out.is_outgoing);
    assert_eq!(out.local_frame, 185);
    assert!((out.progress - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(out.style.opacity, 1.0);
    assert_eq!(inc.index, 1);
    assert!(!inc.is_outgoing);
    assert_eq!(inc.local_frame, 5);
    assert!((inc.progress - 1.0 / 3.0).abs() < 1e-12);
    assert!(inc.style.opacity > 0.0 && inc.style.opacity < 1.0);
}

#[test]
fn incoming_progress_rises_monotonically() {
    let items = [clip(MediaKind::Video, 60), clip(MediaKind::Video, 60)];
    let timed = schedule_media(&items, 15);
    let mut prev = -1.0;
    for f in 45..60 {
        let active = active_media(&timed, 15, &TransitionKind::Zoom, FrameIndex(f));
        let inc = active.iter().find(|a| a.index == 1).unwrap();
        assert!(inc.progress > prev);
        prev = inc.progress;
    }
}

#[test]
fn zero_transition_is_a_hard_cut() {
    let items = [clip(MediaKind::Video, 10), clip(MediaKind::Video, 10)];
    let timed = schedule_media(&items, 0);
    assert_eq!(timed[1].start_frame, 10);
    let at = active_media(&timed, 0, &TransitionKind::Crossfade, FrameIndex(10));
    assert_eq!(at.len(), 1);
    assert_eq!(at[0].index, 1);
    assert_eq!(at[0].style, TransitionStyle::IDENTITY);
}

#[test]
fn props_defaults_and_wire_names() {
    let props: StitchMediaProps = serde_json::from_str(
        r#"{"media":[{"type":"video","src":"/data/media/a.mp4","durationInFrames":90}]}"#,
    )
    .unwrap();
    assert_eq!(props.transition, TransitionKind::Crossfade);
    assert_eq!(props.transition_duration, 15);
    assert_eq!(props.media[0].kind, MediaKind::Video);
    assert_eq!(props.media[0].duration_in_frames, 90);
}
