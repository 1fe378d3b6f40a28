//! Zombie Survivor entry point
//!
//! The native build has no renderer: it runs the simulation headless in
//! attract mode and logs what happens. Rendering hosts embed the library
//! and drive [`zombie_survivor::Game`] from their own frame callback.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use zombie_survivor::driver::autopilot;
    use zombie_survivor::persistence::FileStore;
    use zombie_survivor::sim::GameEvent;
    use zombie_survivor::{Game, Settings};

    env_logger::init();
    log::info!("Zombie Survivor (native) starting...");

    let settings = Settings::load(Path::new("zombie_survivor_settings.json"));
    let store = FileStore::new(&settings.unlocks_path);
    let frames = settings.demo_frames;
    let mut game = Game::new(settings, Box::new(store));

    let mut runs = 0u32;
    let mut best = (0u64, 0u32);
    for _ in 0..frames {
        let input = autopilot(game.state());
        for event in game.frame(&input) {
            match event {
                GameEvent::RunStarted => runs += 1,
                GameEvent::GameOver { score, wave } => {
                    if score > best.0 {
                        best = (score, wave);
                    }
                }
                GameEvent::WeaponUnlocked { weapon } => {
                    log::info!("Demo unlocked {}", weapon.name());
                }
                _ => {}
            }
        }
    }

    let snapshot = game.snapshot();
    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string(&snapshot) {
            Ok(json) => log::debug!("Final frame: {json}"),
            Err(err) => log::warn!("Could not serialize final frame: {err}"),
        }
    }

    println!(
        "{} frames, {} runs, best score {} (wave {}), now on wave {} with score {}",
        game.frames(),
        runs,
        best.0,
        best.1,
        snapshot.wave,
        snapshot.player.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts drive `Game::frame` from requestAnimationFrame
}
