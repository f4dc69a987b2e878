//! Per-frame update: clock, atmosphere and the objects that follow it.

use glam::Vec3;

use crate::assets::{FontData, PendingAsset};
use crate::atmosphere::{AtmosphereConfig, AtmosphereController, AtmosphereSnapshot};
use crate::core::Result;
use crate::core::time::{clamp_delta, MAX_FRAME_DELTA};
use crate::particles::{ParticleConfig, ParticleField, ParticleInstance};

/// Title shown above the meadow once its font has loaded.
pub const TITLE: &str = "meadow";
/// Size of the title in world units per em.
pub const TITLE_SIZE: f32 = 1.5;
/// Rest position of the title group's baseline centre.
pub const TITLE_ANCHOR: Vec3 = Vec3::new(0.0, 4.6, 10.0);
pub const TITLE_BOB_AMPLITUDE: f32 = 0.25;
/// Radians per second.
pub const TITLE_BOB_SPEED: f32 = 1.5;

/// Pink point lights hung under the title, spread across its width.
pub const UNDERGLOW_COLOR: [f32; 3] = [1.0, 0.4, 0.8];
pub const UNDERGLOW_INTENSITY: f32 = 2.5;
pub const UNDERGLOW_RANGE: f32 = 8.0;
/// Offset of the middle light from the title's baseline centre.
const UNDERGLOW_OFFSET: Vec3 = Vec3::new(0.0, -1.7, 0.7);

/// The three underglow lights for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Underglow {
    pub positions: [Vec3; 3],
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
}

/// Colours of the emissive title text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMaterial {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

impl TextMaterial {
    pub fn from_snapshot(snapshot: &AtmosphereSnapshot) -> Self {
        let p = &snapshot.params;
        Self {
            color: p.text_color,
            emissive: p.text_emissive,
            emissive_intensity: p.text_emissive_intensity,
        }
    }

    pub fn apply(&mut self, snapshot: &AtmosphereSnapshot) {
        *self = Self::from_snapshot(snapshot);
    }
}

/// The floating title: its material and where it sits this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingText {
    pub material: TextMaterial,
    /// Baseline centre, bobbing about [`TITLE_ANCHOR`].
    pub position: Vec3,
    /// Laid-out width of [`TITLE`].
    pub width: f32,
}

impl FloatingText {
    fn new(font: &FontData, snapshot: &AtmosphereSnapshot, elapsed: f32) -> Self {
        let mut text = Self {
            material: TextMaterial::from_snapshot(snapshot),
            position: TITLE_ANCHOR,
            width: font.advance(TITLE, TITLE_SIZE),
        };
        text.update(snapshot, elapsed);
        text
    }

    pub fn underglow(&self) -> Underglow {
        let spacing = self.width / 2.5;
        let centre = self.position + UNDERGLOW_OFFSET;
        Underglow {
            positions: [-1.0_f32, 0.0, 1.0].map(|k| centre + Vec3::X * (k * spacing)),
            color: UNDERGLOW_COLOR,
            intensity: UNDERGLOW_INTENSITY,
            range: UNDERGLOW_RANGE,
        }
    }

    fn update(&mut self, snapshot: &AtmosphereSnapshot, elapsed: f32) {
        self.material.apply(snapshot);
        self.position.y = TITLE_ANCHOR.y + (elapsed * TITLE_BOB_SPEED).sin() * TITLE_BOB_AMPLITUDE;
    }
}

/// Everything a frame needs to draw, computed once before any draw call.
#[derive(Clone, Debug)]
pub struct FrameState {
    /// Scene time in seconds, sum of clamped deltas.
    pub elapsed: f32,
    /// Clamped delta of this frame.
    pub dt: f32,
    /// Time fed to the cloud noise, including transition speed-ups.
    pub cloud_time: f32,
    pub snapshot: AtmosphereSnapshot,
    /// Particle positions after this frame's drift.
    pub particles: Vec<ParticleInstance>,
    /// `None` until the title font has loaded, and for good if it failed.
    pub text: Option<FloatingText>,
}

pub struct FrameLoop {
    elapsed: f32,
    max_dt: f32,
    controller: AtmosphereController,
    particles: ParticleField,
    pending_font: Option<PendingAsset<FontData>>,
    text: Option<FloatingText>,
}

impl FrameLoop {
    pub fn new(atmosphere: &AtmosphereConfig, particles: &ParticleConfig, night_enabled: bool) -> Result<Self> {
        let controller = AtmosphereController::new(atmosphere, night_enabled)?;
        Ok(Self {
            elapsed: 0.0,
            max_dt: MAX_FRAME_DELTA,
            controller,
            particles: ParticleField::new(particles),
            pending_font: None,
            text: None,
        })
    }

    pub fn with_max_dt(mut self, max_dt: f32) -> Self {
        self.max_dt = max_dt;
        self
    }

    /// Advance by `raw_dt` seconds of wall time.
    pub fn tick(&mut self, raw_dt: f32) -> FrameState {
        let dt = clamp_delta(raw_dt, self.max_dt);
        self.elapsed += dt;

        self.controller.advance(dt);
        let snapshot = self.controller.snapshot();

        self.particles.update(dt, self.elapsed, snapshot.particle_speed());
        self.poll_font(&snapshot);
        if let Some(text) = self.text.as_mut() {
            text.update(&snapshot, self.elapsed);
        }

        FrameState {
            elapsed: self.elapsed,
            dt,
            cloud_time: self.elapsed + snapshot.cloud_time_offset,
            snapshot,
            particles: self.particles.instances(),
            text: self.text,
        }
    }

    /// Head for day or night. Already heading there is a no-op.
    pub fn set_night(&mut self, night: bool) {
        self.controller.set_night(night);
        log::debug!("Night mode set to {} (progress {:.3})", night, self.controller.progress());
    }

    /// Hand over the title font load. The title appears on the first tick
    /// after it completes.
    pub fn load_title_font(&mut self, pending: PendingAsset<FontData>) {
        self.pending_font = Some(pending);
    }

    fn poll_font(&mut self, snapshot: &AtmosphereSnapshot) {
        let Some(result) = self.pending_font.as_mut().and_then(PendingAsset::poll) else {
            return;
        };
        let label = self.pending_font.take().map(|p| p.label().to_string()).unwrap_or_default();
        match result {
            Ok(font) => {
                if !font.covers(TITLE) {
                    log::warn!("Font {} lacks glyphs for \"{}\"", label, TITLE);
                }
                log::info!("Loaded title font {} ({} glyphs)", label, font.glyphs.len());
                self.text = Some(FloatingText::new(&font, snapshot, self.elapsed));
            }
            Err(e) => log::warn!("Failed to load title font {}: {}; title stays hidden", label, e),
        }
    }

    /// Flip between day and night.
    pub fn toggle_night(&mut self) {
        self.controller.request_toggle();
        log::debug!(
            "Night mode -> {} (progress {:.3})",
            self.controller.target() >= 0.5,
            self.controller.progress()
        );
    }

    pub fn text(&self) -> Option<&FloatingText> {
        self.text.as_ref()
    }

    /// True while a title font load is outstanding.
    pub fn font_pending(&self) -> bool {
        self.pending_font.is_some()
    }

    pub fn controller(&self) -> &AtmosphereController {
        &self.controller
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetLoader;
    use crate::atmosphere::AtmosphereParams;

    fn frame_loop(night: bool) -> FrameLoop {
        let particles = ParticleConfig { count: 16, ..Default::default() };
        FrameLoop::new(&AtmosphereConfig::default(), &particles, night).unwrap()
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut fl = frame_loop(false);
        let state = fl.tick(5.0);
        assert_eq!(state.dt, MAX_FRAME_DELTA);
        assert_eq!(state.elapsed, MAX_FRAME_DELTA);
        let state = fl.tick(-1.0);
        assert_eq!(state.dt, 0.0);
        let state = fl.tick(f32::NAN);
        assert_eq!(state.dt, 0.0);
        assert_eq!(fl.elapsed(), MAX_FRAME_DELTA);
    }

    #[test]
    fn test_cloud_time_tracks_elapsed_when_idle() {
        let mut fl = frame_loop(false);
        let mut state = fl.tick(0.016);
        for _ in 0..10 {
            state = fl.tick(0.016);
        }
        assert!((state.cloud_time - state.elapsed).abs() < 1e-6);
    }

    #[test]
    fn test_transition_speeds_up_clouds() {
        let mut fl = frame_loop(false);
        fl.toggle_night();
        let mut state = fl.tick(0.05);
        for _ in 0..20 {
            state = fl.tick(0.05);
        }
        assert!(state.cloud_time > state.elapsed + 1.0);
        assert!((state.cloud_time - state.elapsed - state.snapshot.cloud_time_offset).abs() < 1e-4);
    }

    fn font() -> FontData {
        let json = r#"{"resolution": 1000, "glyphs": {
            "m": {"ha": 800}, "e": {"ha": 500}, "a": {"ha": 500}, "d": {"ha": 550},
            "o": {"ha": 550}, "w": {"ha": 700}
        }}"#;
        FontData::decode(json.as_bytes()).unwrap()
    }

    fn tick_until_font_resolved(fl: &mut FrameLoop) -> FrameState {
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        loop {
            let state = fl.tick(0.016);
            if !fl.font_pending() {
                return state;
            }
            assert!(std::time::Instant::now() < deadline, "font load never resolved");
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
    }

    #[test]
    fn test_text_absent_is_noop() {
        let mut fl = frame_loop(false);
        fl.toggle_night();
        let state = fl.tick(0.1);
        assert!(fl.text().is_none());
        assert!(state.text.is_none());
    }

    #[test]
    fn test_ready_font_attaches_on_next_tick() {
        let mut fl = frame_loop(false);
        fl.load_title_font(PendingAsset::ready("title", Ok(font())));
        assert!(fl.text().is_none());
        let state = fl.tick(0.016);
        let text = state.text.unwrap();
        assert_eq!(text.material.color, AtmosphereParams::day().text_color);
        assert!((text.width - 3.6 * TITLE_SIZE).abs() < 1e-4);
        assert!(!fl.font_pending());
    }

    #[test]
    fn test_font_loaded_from_disk_attaches_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("title.typeface.json");
        std::fs::write(&path, r#"{"glyphs": {"m": {"ha": 800}}}"#).unwrap();
        let loader = AssetLoader::new().unwrap();

        let mut fl = frame_loop(true);
        fl.load_title_font(loader.load_font(&path));
        let state = tick_until_font_resolved(&mut fl);
        let text = state.text.unwrap();
        assert_eq!(text.material.emissive, AtmosphereParams::night().text_emissive);
    }

    #[test]
    fn test_missing_font_leaves_loop_running() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new().unwrap();

        let mut fl = frame_loop(false);
        fl.load_title_font(loader.load_font(dir.path().join("missing.typeface.json")));
        tick_until_font_resolved(&mut fl);
        for _ in 0..10 {
            let state = fl.tick(0.016);
            assert!(state.text.is_none());
            assert_eq!(state.particles.len(), 16);
        }
    }

    #[test]
    fn test_text_material_follows_night() {
        let mut fl = frame_loop(false);
        fl.load_title_font(PendingAsset::ready("title", Ok(font())));
        fl.tick(0.0);
        fl.toggle_night();
        for _ in 0..40 {
            fl.tick(0.1);
        }
        let night = AtmosphereParams::night();
        let material = fl.text().unwrap().material;
        assert_eq!(material.color, night.text_color);
        assert_eq!(material.emissive_intensity, night.text_emissive_intensity);
    }

    #[test]
    fn test_title_bobs_about_anchor() {
        let mut fl = frame_loop(false);
        fl.load_title_font(PendingAsset::ready("title", Ok(font())));
        let mut lowest = f32::MAX;
        let mut highest = f32::MIN;
        for _ in 0..300 {
            let p = fl.tick(0.02).text.unwrap().position;
            assert_eq!((p.x, p.z), (TITLE_ANCHOR.x, TITLE_ANCHOR.z));
            lowest = lowest.min(p.y);
            highest = highest.max(p.y);
        }
        assert!(lowest >= TITLE_ANCHOR.y - TITLE_BOB_AMPLITUDE - 1e-5);
        assert!(highest <= TITLE_ANCHOR.y + TITLE_BOB_AMPLITUDE + 1e-5);
        assert!(highest - lowest > 1.8 * TITLE_BOB_AMPLITUDE);
    }

    #[test]
    fn test_underglow_follows_title() {
        let mut fl = frame_loop(false);
        fl.load_title_font(PendingAsset::ready("title", Ok(font())));
        let text = fl.tick(0.3).text.unwrap();
        let glow = text.underglow();
        let spacing = text.width / 2.5;
        assert!((glow.positions[1] - (text.position + Vec3::new(0.0, -1.7, 0.7))).length() < 1e-5);
        assert!((glow.positions[2].x - glow.positions[1].x - spacing).abs() < 1e-5);
        assert!((glow.positions[1].x - glow.positions[0].x - spacing).abs() < 1e-5);
        assert!(glow.positions.iter().all(|p| p.y == glow.positions[0].y));
    }

    #[test]
    fn test_set_night_is_idempotent() {
        let mut fl = frame_loop(false);
        fl.set_night(true);
        fl.tick(0.1);
        let progress = fl.controller().progress();
        fl.set_night(true);
        assert_eq!(fl.controller().target(), 1.0);
        assert!(fl.tick(0.1).snapshot.progress > progress);

        fl.set_night(false);
        assert_eq!(fl.controller().target(), 0.0);
        for _ in 0..40 {
            fl.set_night(false);
            fl.tick(0.1);
        }
        assert_eq!(fl.controller().snapshot().params, AtmosphereParams::day());
    }

    #[test]
    fn test_snapshot_is_from_this_tick() {
        let mut fl = frame_loop(true);
        let state = fl.tick(0.016);
        assert_eq!(state.snapshot, fl.controller().snapshot());
        assert_eq!(state.snapshot.params, AtmosphereParams::night());
        assert_eq!(state.particles.len(), 16);
    }
}
