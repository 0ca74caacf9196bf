use super::*;
use crate::effects::transitions::TransitionKind;

#[test]
fn ids_parse_from_exact_names_only() {
    for id in CompositionId::ALL {
        assert_eq!(id.as_str().parse::<CompositionId>().unwrap(), id);
        assert_eq!(id.to_string(), id.as_str());
    }
    let err = "slotmachine".parse::<CompositionId>().unwrap_err();
    assert!(matches!(err, ReelkitError::Validation(_)));
    assert!("BattleIntro".parse::<CompositionId>().is_err());
}

#[test]
fn every_id_is_registered() {
    let reg = Registry::builtin();
    assert_eq!(reg.entries().len(), CompositionId::ALL.len());
    for id in CompositionId::ALL {
        let e = reg.get(id).unwrap();
        assert_eq!(e.config.width, 1080);
        assert_eq!(e.config.height, 1920);
        assert_eq!(e.config.fps, Fps::whole(30));
    }
}

#[test]
fn battle_durations_default_to_195_and_240() {
    let reg = Registry::builtin();
    let plain = CompositionProps::defaults(CompositionId::SlotMachine);
    let rush = CompositionProps::defaults(CompositionId::SlotMachineWithEffect);
    assert_eq!(reg.duration_for(&plain).unwrap(), 195);
    assert_eq!(reg.duration_for(&rush).unwrap(), 240);
}

#[test]
fn battle_duration_covers_a_slow_hero_reel() {
    let reg = Registry::builtin();
    let timing = serde_json::json!({"timing": {"bossSpinDuration": 150}});
    let plain = CompositionProps::from_json(CompositionId::SlotMachine, timing.clone()).unwrap();
    let rush = CompositionProps::from_json(CompositionId::SlotMachineWithEffect, timing).unwrap();
    // Hero settles at 30 + 15 + 150 + 24 = 219.
    assert_eq!(reg.duration_for(&plain).unwrap(), 255);
    assert_eq!(reg.duration_for(&rush).unwrap(), 300);

    let huge = CompositionProps::from_json(
        CompositionId::SlotMachine,
        serde_json::json!({"timing": {"heroDelay": u64::MAX}}),
    )
    .unwrap();
    assert_eq!(reg.duration_for(&huge).unwrap(), u64::MAX);
}

#[test]
fn stitch_duration_is_computed_from_props() {
    let reg = Registry::builtin();
    let props = CompositionProps::from_json(
        CompositionId::StitchMedia,
        serde_json::json!({
            "media": [
                {"type": "video", "src": "/data/media/a.mp4", "durationInFrames": 195},
                {"type": "image", "src": "/data/media/b.png", "durationInFrames": 150}
            ],
            "transition": "zoom"
        }),
    )
    .unwrap();
    assert_eq!(reg.duration_for(&props).unwrap(), 330);
    let cfg = reg.video_config_for(&props).unwrap();
    assert_eq!(cfg.duration_in_frames, 330);
    assert_eq!(cfg.canvas().width, 1080);

    let CompositionProps::StitchMedia(p) = props else {
        panic!("expected stitch props");
    };
    assert_eq!(p.transition, TransitionKind::Zoom);
    assert_eq!(p.transition_duration, 15);
}

#[test]
fn empty_stitch_has_zero_duration() {
    let reg = Registry::builtin();
    let props = CompositionProps::defaults(CompositionId::StitchMedia);
    assert_eq!(reg.duration_for(&props).unwrap(), 0);
}

#[test]
fn reveal_duration_follows_props() {
    let reg = Registry::builtin();
    let props = CompositionProps::from_json(
        CompositionId::BrushReveal,
        serde_json::json!({"src": "x.png", "durationInFrames": 90}),
    )
    .unwrap();
    assert_eq!(reg.duration_for(&props).unwrap(), 90);
    let default = CompositionProps::defaults(CompositionId::ParticleAssembly);
    assert_eq!(reg.duration_for(&default).unwrap(), 150);
}

#[test]
fn null_props_select_defaults() {
    let props =
        CompositionProps::from_json(CompositionId::SlotMachine, serde_json::Value::Null).unwrap();
    let CompositionProps::SlotMachine(p) = &props else {
        panic!("expected slot machine props");
    };
    assert_eq!(p.boss, "Monday Morning");
    assert_eq!(p.hero, "Coffee Cup");
    assert_eq!(props.id(), CompositionId::SlotMachine);
}

#[test]
fn malformed_props_are_validation_errors() {
    let err = CompositionProps::from_json(
        CompositionId::StitchMedia,
        serde_json::json!({"media": "not a list"}),
    )
    .unwrap_err();
    assert!(matches!(err, ReelkitError::Validation(_)));
    assert!(err.to_string().contains("StitchMedia"));
}

#[test]
fn oversized_particle_grid_is_rejected() {
    let err = CompositionProps::from_json(
        CompositionId::ParticleAssembly,
        serde_json::json!({"src": "a.png", "gridSize": 100_000}),
    )
    .unwrap_err();
    assert!(matches!(err, ReelkitError::Validation(_)));
    assert!(err.to_string().contains("gridSize"));

    let edge = CompositionProps::from_json(
        CompositionId::ParticleAssembly,
        serde_json::json!({"gridSize": MAX_GRID_SIZE}),
    );
    assert!(edge.is_ok());
}

#[test]
fn resolve_sources_rewrites_media_and_audio() {
    let resolver = AssetResolver::default();
    let stitch = CompositionProps::from_json(
        CompositionId::StitchMedia,
        serde_json::json!({"media": [
            {"type": "image", "src": "/data/media/a.png", "durationInFrames": 30},
            {"type": "video", "src": "clip.mp4", "durationInFrames": 30}
        ]}),
    )
    .unwrap();
    let CompositionProps::StitchMedia(p) = stitch.resolve_sources(&resolver).unwrap() else {
        panic!("expected stitch props");
    };
    assert_eq!(p.media[0].src, "http://localhost:3001/media/a.png");
    assert_eq!(p.media[1].src, "clip.mp4");

    let battle = CompositionProps::from_json(
        CompositionId::SlotMachineWithEffect,
        serde_json::json!({"audioSrc": "sfx/bgm.mp3"}),
    )
    .unwrap();
    let CompositionProps::SlotMachineWithEffect(p) = battle.resolve_sources(&resolver).unwrap()
    else {
        panic!("expected battle props");
    };
    assert_eq!(p.audio_src.as_deref(), Some("public/sfx/bgm.mp3"));

    let silent = CompositionProps::from_json(
        CompositionId::SlotMachine,
        serde_json::json!({"audioSrc": ""}),
    )
    .unwrap();
    assert_eq!(silent.resolve_sources(&resolver).unwrap(), silent);
}

#[test]
fn props_serialize_back_to_camel_case() {
    let props = CompositionProps::defaults(CompositionId::SketchToColor);
    let v = props.to_json().unwrap();
    assert_eq!(v["durationInFrames"], 150);
    assert_eq!(v["gridSize"], 12);
}
