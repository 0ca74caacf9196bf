use crate::animation::ease::Ease;
use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::animation::random::Seed;
use crate::composition::reel::{Reel, ReelFrame, ReelSpec};
use crate::foundation::core::FrameIndex;

/// Labels the boss reel spins through.
pub const BOSS_OPTIONS: [&str; 20] = [
    "Angry Mom",
    "Monday Morning",
    "Alarm Clock",
    "Student Loans",
    "Tax Season",
    "DMV Lady",
    "Gym Trainer",
    "WiFi Outage",
    "Empty Fridge",
    "Traffic Jam",
    "Boss's Email",
    "Dentist",
    "Credit Card Bill",
    "Hangover",
    "Zoom Meeting",
    "Diet Day 1",
    "Ex's Instagram",
    "Parking Ticket",
    "Spider",
    "Low Battery",
];

/// Labels the hero reel spins through.
pub const HERO_OPTIONS: [&str; 20] = [
    "Baby Chick",
    "Sleepy Cat",
    "Confused Dog",
    "Office Plant",
    "Rubber Duck",
    "Lazy Sloth",
    "Tiny Hamster",
    "Brave Snail",
    "Fluffy Bunny",
    "Tired Dad",
    "Coffee Cup",
    "Pizza Slice",
    "Couch Potato",
    "Bubble Tea",
    "Goldfish",
    "House Cat",
    "Burrito",
    "Ice Cream",
    "Sock Puppet",
    "Nap Time",
];

/// Frame at which the boss reel starts spinning.
pub const BOSS_START: u64 = 30;
/// Number of marquee lights in each row.
pub const LIGHT_COUNT: usize = 7;
/// Frames the settled result stays on screen after the hero reel stops.
pub const SETTLED_HOLD: u64 = 36;
/// Length of the rush in frames.
pub const RUSH_LENGTH: u64 = 45;

const LIGHT_PERIOD: u64 = 12;
const FLASH_PERIOD: u64 = 15;
const VS_PERIOD: u64 = 24;

/// Named frame offsets of the battle intro.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimingSpec {
    /// Title fade-in length.
    pub title_fade_in: u64,
    /// Delay before the machine body fades in.
    pub slot_machine_fade_in: u64,
    /// Boss reel spin length.
    pub boss_spin_duration: u64,
    /// Delay between the boss and hero reel starts.
    pub hero_delay: u64,
    /// Extra spin the hero reel gets over the boss reel.
    pub hero_extra_time: u64,
    /// Delay before the result is shown.
    pub result_delay: u64,
}

impl Default for TimingSpec {
    fn default() -> Self {
        Self {
            title_fade_in: 24,
            slot_machine_fade_in: 9,
            boss_spin_duration: 90,
            hero_delay: 15,
            hero_extra_time: 24,
            result_delay: 6,
        }
    }
}

impl TimingSpec {
    /// Frame at which the hero reel starts spinning.
    pub fn hero_start(&self) -> u64 {
        BOSS_START.saturating_add(self.hero_delay)
    }

    /// Spin length of the hero reel.
    pub fn hero_spin_duration(&self) -> u64 {
        self.boss_spin_duration.saturating_add(self.hero_extra_time)
    }

    /// Frame at which the hero reel settles.
    pub fn hero_end(&self) -> u64 {
        self.hero_start().saturating_add(self.hero_spin_duration())
    }

    /// Length of the plain intro, which is also where the rush begins.
    pub fn intro_frames(&self) -> u64 {
        self.hero_end().saturating_add(SETTLED_HOLD)
    }

    /// Length of the intro followed by the rush.
    pub fn rush_frames(&self) -> u64 {
        self.intro_frames().saturating_add(RUSH_LENGTH)
    }
}

/// Props of the `SlotMachine` and `SlotMachineWithEffect` compositions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlotMachineProps {
    /// Label the boss reel lands on.
    pub boss: String,
    /// Label the hero reel lands on.
    pub hero: String,
    /// Shared reel seed.
    pub seed: Option<Seed>,
    /// Optional background track, relative to the static root.
    pub audio_src: Option<String>,
    /// Background track volume.
    pub audio_volume: f64,
    /// Timing overrides.
    pub timing: TimingSpec,
}

impl Default for SlotMachineProps {
    fn default() -> Self {
        Self {
            boss: "Monday Morning".to_owned(),
            hero: "Coffee Cup".to_owned(),
            seed: None,
            audio_src: None,
            audio_volume: 1.0,
            timing: TimingSpec::default(),
        }
    }
}

/// Whether the intro ends with the zoom-and-fade rush.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleVariant {
    /// Plain intro.
    Plain,
    /// Intro followed by the rush.
    Rush,
}

/// Color family of a marquee light.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightColor {
    /// Even positions.
    Red,
    /// Odd positions.
    Gold,
}

/// One marquee light at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LightState {
    /// Color family.
    pub color: LightColor,
    /// Blink opacity in `[0.3, 1]`.
    pub opacity: f64,
}

/// Title block state.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TitleState {
    /// Fade-in opacity.
    pub opacity: f64,
    /// Vertical offset in pixels.
    pub translate_y: f64,
}

/// Zoom-and-fade state of the rush variant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RushState {
    /// Uniform scale about the canvas center.
    pub scale: f64,
    /// Opacity of the black overlay.
    pub black_overlay: f64,
}

/// Full battle intro state at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BattleFrame {
    /// Title block.
    pub title: TitleState,
    /// Machine body opacity.
    pub slot_opacity: f64,
    /// Scale of the "VS" label.
    pub vs_scale: f64,
    /// Glow intensity around the machine body.
    pub flash_intensity: f64,
    /// True once both reels have settled.
    pub is_complete: bool,
    /// Marquee row, shared by the top and bottom rows.
    pub lights: Vec<LightState>,
    /// Boss reel.
    pub boss: ReelFrame,
    /// Hero reel.
    pub hero: ReelFrame,
    /// Rush state, only for [`BattleVariant::Rush`].
    pub rush: Option<RushState>,
}

/// Battle intro with both reels derived.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BattleTimeline {
    timing: TimingSpec,
    variant: BattleVariant,
    boss: Reel,
    hero: Reel,
}

impl BattleTimeline {
    /// Derive both reels from `props`.
    pub fn derive(props: &SlotMachineProps, variant: BattleVariant) -> Self {
        let t = props.timing;
        let boss = Reel::derive(&ReelSpec {
            pool: BOSS_OPTIONS.iter().map(|s| (*s).to_owned()).collect(),
            final_value: props.boss.clone(),
            start_frame: BOSS_START,
            duration_frames: t.boss_spin_duration,
            tag: "boss".to_owned(),
            seed: props.seed,
        });
        let hero = Reel::derive(&ReelSpec {
            pool: HERO_OPTIONS.iter().map(|s| (*s).to_owned()).collect(),
            final_value: props.hero.clone(),
            start_frame: t.hero_start(),
            duration_frames: t.hero_spin_duration(),
            tag: "hero".to_owned(),
            seed: props.seed,
        });
        Self {
            timing: t,
            variant,
            boss,
            hero,
        }
    }

    /// Boss reel.
    pub fn boss_reel(&self) -> &Reel {
        &self.boss
    }

    /// Hero reel.
    pub fn hero_reel(&self) -> &Reel {
        &self.hero
    }

    /// Variant this timeline was derived for.
    pub fn variant(&self) -> BattleVariant {
        self.variant
    }

    /// Frame at which the hero reel settles.
    pub fn hero_end(&self) -> FrameIndex {
        self.hero.spin_range().end
    }

    /// First frame of the rush, right after the plain intro ends.
    pub fn rush_start(&self) -> FrameIndex {
        FrameIndex(self.timing.intro_frames())
    }

    /// True from [`Self::hero_end`] on.
    pub fn is_complete(&self, frame: FrameIndex) -> bool {
        frame >= self.hero_end()
    }

    /// Glow intensity: steady before completion, pulsing after.
    pub fn flash_intensity(&self, frame: FrameIndex) -> f64 {
        if !self.is_complete(frame) {
            return 0.4;
        }
        interpolate(
            (frame.0 % FLASH_PERIOD) as f64,
            [0.0, 7.0, 15.0],
            [0.4, 0.8, 0.4],
            InterpolateOpts::default(),
        )
    }

    /// Title fade and slide.
    pub fn title(&self, frame: FrameIndex) -> TitleState {
        let fade = self.timing.title_fade_in as f64;
        let f = frame.as_f64();
        TitleState {
            opacity: interpolate(f, [0.0, fade], [0.0, 1.0], InterpolateOpts::clamp_right()),
            translate_y: interpolate(
                f,
                [0.0, fade],
                [-30.0, 0.0],
                InterpolateOpts::clamp_right().with_ease(Ease::OutEase),
            ),
        }
    }

    /// Machine body fade-in.
    pub fn slot_opacity(&self, frame: FrameIndex) -> f64 {
        let start = self.timing.slot_machine_fade_in as f64;
        interpolate(
            frame.as_f64(),
            [start, start + self.timing.title_fade_in as f64],
            [0.0, 1.0],
            InterpolateOpts::clamped(),
        )
    }

    /// Pulsing scale of the "VS" label.
    pub fn vs_scale(&self, frame: FrameIndex) -> f64 {
        interpolate(
            (frame.0 % VS_PERIOD) as f64,
            [0.0, 12.0, 24.0],
            [1.0, 1.15, 1.0],
            InterpolateOpts::clamp_right(),
        )
    }

    /// Zoom and fade of the rush, `None` for the plain variant.
    pub fn rush(&self, frame: FrameIndex) -> Option<RushState> {
        if self.variant != BattleVariant::Rush {
            return None;
        }
        let f = frame.as_f64();
        let rush_start = self.rush_start();
        let start = rush_start.as_f64();
        let len = RUSH_LENGTH as f64;
        let scale = if frame >= rush_start {
            interpolate(
                f,
                [start, start + len],
                [1.0, 15.0],
                InterpolateOpts::clamped().with_ease(Ease::InCubic),
            )
        } else {
            1.0
        };
        let black_overlay = interpolate(
            f,
            [start + len * 0.3, start + len * 0.8],
            [0.0, 1.0],
            InterpolateOpts::clamped().with_ease(Ease::InQuad),
        );
        Some(RushState {
            scale,
            black_overlay,
        })
    }

    /// Full state at `frame`.
    pub fn frame(&self, frame: FrameIndex) -> BattleFrame {
        BattleFrame {
            title: self.title(frame),
            slot_opacity: self.slot_opacity(frame),
            vs_scale: self.vs_scale(frame),
            flash_intensity: self.flash_intensity(frame),
            is_complete: self.is_complete(frame),
            lights: lights(frame, LIGHT_COUNT),
            boss: self.boss.frame(frame),
            hero: self.hero.frame(frame),
            rush: self.rush(frame),
        }
    }
}

/// Blink opacity of a light with phase `offset` at `frame`.
pub fn light_opacity(frame: FrameIndex, offset: u64) -> f64 {
    interpolate(
        ((frame.0 % LIGHT_PERIOD + offset % LIGHT_PERIOD) % LIGHT_PERIOD) as f64,
        [0.0, 6.0, 12.0],
        [0.3, 1.0, 0.3],
        InterpolateOpts::default(),
    )
}

/// A row of `count` lights alternating red (offset 0) and gold (offset 6).
pub fn lights(frame: FrameIndex, count: usize) -> Vec<LightState> {
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                LightState {
                    color: LightColor::Red,
                    opacity: light_opacity(frame, 0),
                }
            } else {
                LightState {
                    color: LightColor::Gold,
                    opacity: light_opacity(frame, 6),
                }
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/composition/battle.rs"]
mod tests;
