use super::*;

fn pool(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("item-{i}")).collect()
}

fn spec(seed: Option<Seed>) -> ReelSpec {
    ReelSpec {
        pool: pool(20),
        final_value: "Monday Morning".to_owned(),
        start_frame: 30,
        duration_frames: 90,
        tag: "boss".to_owned(),
        seed,
    }
}

#[test]
fn sequence_shape_holds_for_both_seed_paths() {
    for seed in [None, Some(0), Some(42), Some(-7)] {
        let seq = build_reel_sequence(&pool(20), "Tax Season", "boss", seed);
        assert_eq!(seq.len(), 61, "{seed:?}");
        assert_eq!(seq.final_value(), "Tax Season");
        assert_eq!(seq.final_index(), 60);
    }
}

#[test]
fn seeded_sequence_uses_three_consecutive_shuffles() {
    let p = pool(8);
    let seq = build_reel_sequence(&p, "x", "hero", Some(100));
    let s = 100 + string_to_seed("hero");
    let mut expected = shuffle(&p, s);
    expected.extend(shuffle(&p, s + 1));
    expected.extend(shuffle(&p, s + 2));
    expected.push("x".to_owned());
    assert_eq!(seq.items(), expected.as_slice());
}

#[test]
fn unseeded_sequence_repeats_one_shuffle() {
    let p = pool(8);
    let seq = build_reel_sequence(&p, "x", "hero", None);
    let once = shuffle(&p, string_to_seed("xhero"));
    assert_eq!(&seq.items()[0..8], once.as_slice());
    assert_eq!(&seq.items()[8..16], once.as_slice());
    assert_eq!(&seq.items()[16..24], once.as_slice());
}

#[test]
fn sequence_is_reproducible() {
    let a = build_reel_sequence(&pool(20), "a", "boss", Some(9));
    let b = build_reel_sequence(&pool(20), "a", "boss", Some(9));
    assert_eq!(a, b);
    let c = build_reel_sequence(&pool(20), "a", "hero", Some(9));
    assert_ne!(a, c);
}

#[test]
fn empty_pool_still_ends_on_final_value() {
    let seq = build_reel_sequence(&[], "only", "boss", None);
    assert_eq!(seq.items(), ["only".to_owned()].as_slice());
    assert_eq!(seq.final_index(), 0);
}

#[test]
fn phases_follow_the_spin_window() {
    let reel = Reel::derive(&spec(Some(3)));
    assert_eq!(reel.phase(FrameIndex(29)), ReelPhase::Idle);
    assert_eq!(reel.phase(FrameIndex(30)), ReelPhase::Spinning);
    assert_eq!(reel.phase(FrameIndex(119)), ReelPhase::Spinning);
    assert_eq!(reel.phase(FrameIndex(120)), ReelPhase::Settled);

    let flips = (0..200)
        .map(|f| reel.phase(FrameIndex(f)) == ReelPhase::Settled)
        .collect::<Vec<_>>()
        .windows(2)
        .filter(|w| w[0] != w[1])
        .count();
    assert_eq!(flips, 1);
}

#[test]
fn offsets_at_rest_points() {
    let reel = Reel::derive(&spec(None));
    let before = reel.frame(FrameIndex(0));
    assert_eq!(before.progress, 0.0);
    assert_eq!(before.offset_y, ITEM_HEIGHT / 2.0);
    assert_eq!(before.highlighted, None);

    let after = reel.frame(FrameIndex(150));
    assert_eq!(after.progress, 1.0);
    assert_eq!(after.offset_y, -60.0 * ITEM_HEIGHT + ITEM_HEIGHT / 2.0);
    assert_eq!(after.highlighted, Some(60));
}

#[test]
fn offset_decreases_monotonically_while_spinning() {
    let reel = Reel::derive(&spec(Some(1)));
    let mut prev = f64::INFINITY;
    for f in 30..=120 {
        let st = reel.frame(FrameIndex(f));
        assert!(st.offset_y <= prev, "frame {f}");
        prev = st.offset_y;
    }
}

#[test]
fn zero_duration_reel_settles_at_start() {
    let mut s = spec(None);
    s.duration_frames = 0;
    let reel = Reel::derive(&s);
    assert_eq!(reel.frame(FrameIndex(29)).phase, ReelPhase::Idle);
    assert_eq!(reel.frame(FrameIndex(29)).progress, 0.0);
    let at = reel.frame(FrameIndex(30));
    assert_eq!(at.phase, ReelPhase::Settled);
    assert_eq!(at.progress, 1.0);
}
