//! Orrery configuration (viewport, simulation, camera, script). Loaded from orrery.ron at startup.

use engine_core::Camera;
use glam::Vec3;
use procgen::{ORBIT_SAMPLES, STAR_COUNT, STAR_EXTENT};
use serde::{Deserialize, Serialize};
use simulation::{FollowEasing, SimulationSettings};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::script::{ScriptAction, ScriptStep};

/// Startup settings. Loaded from `orrery.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrreryConfig {
    /// Viewport width in logical pixels (pointer coordinates are relative to this).
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
    /// Initial orbit speed multiplier (0.1..=2.0).
    #[serde(default = "default_orbit_speed")]
    pub orbit_speed: f32,
    #[serde(default = "default_star_count")]
    pub star_count: usize,
    /// Half-extent of the starfield cube.
    #[serde(default = "default_star_extent")]
    pub star_extent: f32,
    /// Segments per orbit line.
    #[serde(default = "default_orbit_samples")]
    pub orbit_samples: usize,
    #[serde(default = "default_camera_position")]
    pub camera_position: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    /// Camera offset from a focused body.
    #[serde(default = "default_follow_offset")]
    pub follow_offset: [f32; 3],
    #[serde(default)]
    pub follow_easing: FollowEasing,
    /// Year length of the on-screen day counter.
    #[serde(default = "default_year_length")]
    pub year_length: u32,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f32,
    /// Frames to simulate before exiting.
    #[serde(default = "default_frames")]
    pub frames: u64,
    /// Pace frames against the wall clock instead of a fixed delta.
    #[serde(default)]
    pub realtime: bool,
    /// RNG seed for the starfield and initial phases. Absent = entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// RON body catalog. Absent = built-in solar system.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Scripted pointer and GUI input.
    #[serde(default = "default_script")]
    pub script: Vec<ScriptStep>,
}

fn default_viewport_width() -> u32 {
    1280
}
fn default_viewport_height() -> u32 {
    720
}
fn default_orbit_speed() -> f32 {
    0.5
}
fn default_star_count() -> usize {
    STAR_COUNT
}
fn default_star_extent() -> f32 {
    STAR_EXTENT
}
fn default_orbit_samples() -> usize {
    ORBIT_SAMPLES
}
fn default_camera_position() -> [f32; 3] {
    [30.0, 30.0, 30.0]
}
fn default_fov() -> f32 {
    25.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}
fn default_follow_offset() -> [f32; 3] {
    [5.0, 5.0, 5.0]
}
fn default_year_length() -> u32 {
    365
}
fn default_frame_rate() -> f32 {
    60.0
}
fn default_frames() -> u64 {
    1200
}

/// Short tour: hover the sun, follow Earth, then Saturn, click away, drop to free movement.
fn default_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep { frame: 30, action: ScriptAction::Pointer { x: 640.0, y: 360.0 } },
        ScriptStep { frame: 60, action: ScriptAction::SelectBody("Earth".to_string()) },
        ScriptStep { frame: 400, action: ScriptAction::SetOrbitSpeed(2.0) },
        ScriptStep { frame: 600, action: ScriptAction::SelectBody("Saturn".to_string()) },
        ScriptStep { frame: 900, action: ScriptAction::PointerLeave },
        ScriptStep { frame: 950, action: ScriptAction::Click },
        ScriptStep { frame: 1000, action: ScriptAction::SelectStar },
        ScriptStep { frame: 1150, action: ScriptAction::FreeMovement },
    ]
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            orbit_speed: default_orbit_speed(),
            star_count: default_star_count(),
            star_extent: default_star_extent(),
            orbit_samples: default_orbit_samples(),
            camera_position: default_camera_position(),
            fov_degrees: default_fov(),
            near: default_near(),
            far: default_far(),
            follow_offset: default_follow_offset(),
            follow_easing: FollowEasing::default(),
            year_length: default_year_length(),
            frame_rate: default_frame_rate(),
            frames: default_frames(),
            realtime: false,
            seed: None,
            catalog_path: None,
            script: default_script(),
        }
    }
}

impl OrreryConfig {
    /// Load config from `orrery.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str::<Self>(&data) {
                Ok(mut c) => {
                    c.follow_easing = c.follow_easing.validated();
                    return c;
                }
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `orrery.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }

    pub fn camera(&self) -> Camera {
        let mut camera = Camera {
            position: Vec3::from_array(self.camera_position),
            target: Vec3::ZERO,
            fov_degrees: self.fov_degrees,
            near: self.near,
            far: self.far,
            ..Default::default()
        };
        camera.set_aspect(self.viewport_width, self.viewport_height);
        camera
    }

    pub fn settings(&self) -> SimulationSettings {
        SimulationSettings {
            speed_multiplier: self.orbit_speed,
            follow_offset: Vec3::from_array(self.follow_offset),
            follow_easing: self.follow_easing,
            year_length: self.year_length,
        }
    }

    /// Fixed delta per simulated frame.
    pub fn frame_delta(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.frame_rate.max(1.0))
    }
}

pub fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("orrery.ron")
}
