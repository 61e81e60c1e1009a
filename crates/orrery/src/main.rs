//! Orrery - interactive star system simulation, driven headless from a script.

mod config;
mod scene;
mod script;

use anyhow::{Context, Result};
use engine_core::TransformRaw;
use procgen::Starfield;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simulation::{BodyCatalog, SimulationState};

use config::OrreryConfig;
use scene::HeadlessScene;
use script::Script;

/// Read the configured catalog, or fall back to the built-in solar system.
/// Either way the catalog is validated before the frame loop starts.
fn load_catalog(config: &OrreryConfig) -> Result<BodyCatalog> {
    match &config.catalog_path {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("reading body catalog {:?}", path))?;
            BodyCatalog::from_ron_str(&source).with_context(|| format!("invalid body catalog {:?}", path))
        }
        None => BodyCatalog::solar_system()
            .validated()
            .context("invalid built-in body catalog"),
    }
}

/// Run the configured frames and return the final state.
fn run(config: &OrreryConfig) -> Result<SimulationState> {
    let catalog = load_catalog(config)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let starfield = Starfield::generate(&mut rng, config.star_count, config.star_extent);
    let mut state = SimulationState::new(catalog, config.camera(), config.settings(), &mut rng);
    let mut scene = HeadlessScene::build(state.bodies(), config.orbit_samples, starfield);
    log::info!("Static vertex data: {} bytes", scene.static_vertex_bytes());

    let mut script = Script::new(config.script.clone());
    let viewport = (config.viewport_width as f32, config.viewport_height as f32);
    let delta = config.frame_delta();
    let report_every = config.frame_rate.max(1.0).round() as u64;

    for frame in 0..config.frames {
        script.apply_due(frame, &mut state, viewport);
        if config.realtime {
            std::thread::sleep(delta);
            state.frame_realtime(&mut scene);
        } else {
            state.frame(delta, &mut scene);
        }

        if frame % report_every == 0 {
            log::info!(
                "{} | focus {:?} | camera {:.2}",
                scene.day_text(),
                state.focus(),
                state.camera().position
            );
        }
    }

    let instances = scene.instance_data();
    log::info!(
        "Finished {} frames ({:.1}s simulated), {} instances / {} bytes per frame, script {}",
        scene.frames_presented(),
        state.clock().elapsed_seconds(),
        instances.len(),
        bytemuck::cast_slice::<TransformRaw, u8>(&instances[..]).len(),
        if script.is_finished() { "complete" } else { "incomplete" }
    );
    Ok(state)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Orrery");
    let config = OrreryConfig::load();
    if !config::config_path().exists() {
        // First run: write the defaults so they can be edited.
        config.save();
    }
    run(&config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::{BodyId, FocusState};

    #[test]
    fn default_script_runs_to_free_movement() {
        let config = OrreryConfig { star_count: 100, seed: Some(3), ..Default::default() };
        let state = run(&config).unwrap();
        assert_eq!(state.focus(), &FocusState::Free);
        assert_eq!(state.clock().frame_count(), config.frames);
        assert_eq!(state.clock().speed_multiplier(), 2.0);
    }

    #[test]
    fn missing_catalog_file_is_fatal() {
        let config = OrreryConfig {
            catalog_path: Some("/nonexistent/catalog.ron".into()),
            star_count: 10,
            ..Default::default()
        };
        assert!(run(&config).is_err());
    }

    #[test]
    fn scripted_selection_follows_body() {
        let config = OrreryConfig { star_count: 10, seed: Some(4), ..Default::default() };
        let mut rng = StdRng::seed_from_u64(4);
        let mut state = SimulationState::new(load_catalog(&config).unwrap(), config.camera(), config.settings(), &mut rng);
        let mut scene = HeadlessScene::build(state.bodies(), config.orbit_samples, Starfield::generate(&mut rng, 10, 150.0));
        let mut script = Script::new(config.script.clone());
        for frame in 0..200 {
            script.apply_due(frame, &mut state, (1280.0, 720.0));
            state.frame(config.frame_delta(), &mut scene);
        }
        assert_eq!(state.focus(), &FocusState::Targeted(BodyId::from("Earth")));
        let earth = state.body(&BodyId::from("Earth")).unwrap().position();
        assert_eq!(state.camera().target, earth);
    }
}
