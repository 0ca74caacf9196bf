use super::*;

const ALL: [TransitionKind; 4] = [
    TransitionKind::Crossfade,
    TransitionKind::Zoom,
    TransitionKind::SlideLeft,
    TransitionKind::SlideRight,
];

#[test]
fn zero_progress_is_identity_for_every_kind() {
    for kind in ALL {
        for outgoing in [false, true] {
            assert_eq!(
                transition_style(0.0, &kind, outgoing),
                TransitionStyle::IDENTITY,
                "{kind:?}"
            );
        }
    }
}

#[test]
fn none_and_unknown_are_identity() {
    let unknown = parse_transition_kind("spiral");
    assert_eq!(unknown, TransitionKind::Unknown("spiral".to_owned()));
    for p in [0.25, 0.5, 1.0] {
        assert_eq!(
            transition_style(p, &TransitionKind::None, false),
            TransitionStyle::IDENTITY
        );
        assert_eq!(transition_style(p, &unknown, true), TransitionStyle::IDENTITY);
    }
}

#[test]
fn crossfade_keeps_outgoing_opaque_and_fades_incoming_in() {
    let mut prev = 0.0;
    for i in 1..=30 {
        let p = f64::from(i) / 30.0;
        let out = transition_style(p, &TransitionKind::Crossfade, true);
        assert_eq!(out.opacity, 1.0);
        assert_eq!(out.transform, ElementTransform::None);
        let inc = transition_style(p, &TransitionKind::Crossfade, false);
        assert!(inc.opacity >= prev);
        prev = inc.opacity;
    }
    assert_eq!(prev, 1.0);
}

#[test]
fn crossfade_quarter_way_matches_eased_progress() {
    let inc = transition_style(0.25, &TransitionKind::Crossfade, false);
    assert!((inc.opacity - 0.157678).abs() < 1e-5, "{}", inc.opacity);
    let slide = transition_style(0.25, &TransitionKind::SlideLeft, false);
    match slide.transform {
        ElementTransform::TranslateXPercent(x) => assert!((x - 84.2322).abs() < 1e-3, "{x}"),
        other => panic!("unexpected transform {other:?}"),
    }
}

#[test]
fn zoom_scales_toward_the_viewer() {
    let out = transition_style(1.0, &TransitionKind::Zoom, true);
    assert_eq!(out.transform, ElementTransform::Scale(1.2));
    let inc = transition_style(1.0, &TransitionKind::Zoom, false);
    assert_eq!(inc.transform, ElementTransform::Scale(1.0));
    assert_eq!(inc.opacity, 1.0);

    let half = transition_style(0.5, &TransitionKind::Zoom, false);
    match half.transform {
        ElementTransform::Scale(s) => assert!((s - 0.9).abs() < 1e-9),
        other => panic!("unexpected transform {other:?}"),
    }
}

#[test]
fn slides_mirror_each_other() {
    let l_out = transition_style(1.0, &TransitionKind::SlideLeft, true);
    let l_in = transition_style(1.0, &TransitionKind::SlideLeft, false);
    assert_eq!(l_out.transform, ElementTransform::TranslateXPercent(-100.0));
    assert_eq!(l_in.transform, ElementTransform::TranslateXPercent(0.0));
    assert_eq!(l_out.opacity, 1.0);

    let r_out = transition_style(0.3, &TransitionKind::SlideRight, true);
    let l_out = transition_style(0.3, &TransitionKind::SlideLeft, true);
    match (r_out.transform, l_out.transform) {
        (ElementTransform::TranslateXPercent(r), ElementTransform::TranslateXPercent(l)) => {
            assert!((r + l).abs() < 1e-12);
        }
        other => panic!("unexpected transforms {other:?}"),
    }
}

#[test]
fn css_rendering() {
    assert_eq!(ElementTransform::None.to_string(), "none");
    assert_eq!(ElementTransform::Scale(1.2).to_string(), "scale(1.2)");
    assert_eq!(
        ElementTransform::TranslateXPercent(-100.0).to_string(),
        "translateX(-100%)"
    );
}

#[test]
fn affine_forms_keep_the_center_fixed() {
    let canvas = Canvas {
        width: 1080,
        height: 1920,
    };
    let c = canvas.center().to_point();
    let scaled = ElementTransform::Scale(2.0).to_affine(canvas) * c;
    assert!((scaled - c).hypot() < 1e-9);

    let shifted = ElementTransform::TranslateXPercent(50.0).to_affine(canvas);
    assert_eq!(shifted.translation().x, 540.0);
    assert_eq!(ElementTransform::None.to_affine(canvas), Affine::IDENTITY);
}

#[test]
fn kinds_parse_and_serialize_by_name() {
    let k: TransitionKind = serde_json::from_str("\"slide-left\"").unwrap();
    assert_eq!(k, TransitionKind::SlideLeft);
    assert_eq!(serde_json::to_string(&TransitionKind::Zoom).unwrap(), "\"zoom\"");
    let u: TransitionKind = serde_json::from_str("\"wipe\"").unwrap();
    assert_eq!(u, TransitionKind::Unknown("wipe".to_owned()));
    assert_eq!(parse_transition_kind(" Crossfade "), TransitionKind::Crossfade);
}
