//! Tile Runner entry point
//!
//! Headless native runner: loads settings and a level, then drives the
//! fixed-timestep simulation (by default with the autopilot) and reports the
//! outcome.
//!
//! Usage: `tile-runner [settings.json] [--variant classic|holiday]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Result, bail};
    use clap::Parser;

    use tile_runner::consts::*;
    use tile_runner::sim::{GamePhase, GameState, TickInput, tick};
    use tile_runner::view::FrameView;
    use tile_runner::{Level, Settings, Variant};

    /// Runner instance holding all state
    struct Game {
        state: GameState,
        accumulator: f32,
        input: TickInput,
        last_phase: GamePhase,
        ticks_run: u32,
    }

    impl Game {
        fn new(state: GameState, idle_mode: bool) -> Self {
            Self {
                last_phase: state.phase,
                state,
                accumulator: 0.0,
                input: TickInput {
                    idle_mode,
                    ..Default::default()
                },
                ticks_run: 0,
            }
        }

        /// Run simulation ticks for `dt` seconds of wall time
        fn update(&mut self, dt: f32, tick_budget: u32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT
                && substeps < MAX_SUBSTEPS
                && self.ticks_run < tick_budget
            {
                let input = self.input;
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;
                self.ticks_run += 1;

                // Clear one-shot inputs after processing
                self.input.jump_pressed = false;
                self.input.dash_pressed = false;
                self.input.restart_pressed = false;
            }

            let phase = self.state.phase;
            if phase != self.last_phase {
                log::info!("Phase {:?} -> {:?}", self.last_phase, phase);
                self.last_phase = phase;
            }
        }

        fn finished(&self, tick_budget: u32) -> bool {
            self.ticks_run >= tick_budget || self.state.phase.is_terminal()
        }
    }

    #[derive(Parser, Debug)]
    #[command(name = "tile-runner")]
    #[command(about = "Headless tile platformer runner")]
    struct Cli {
        /// Settings file (JSON). Defaults are used when omitted or missing.
        settings: Option<PathBuf>,

        /// Gameplay variant: classic or holiday. Overrides the settings file.
        #[arg(long)]
        variant: Option<String>,
    }

    impl Cli {
        fn variant(&self) -> Result<Option<Variant>> {
            let Some(name) = &self.variant else {
                return Ok(None);
            };
            match Variant::from_str(name) {
                Some(variant) => Ok(Some(variant)),
                None => bail!("unknown variant '{name}' (expected classic or holiday)"),
            }
        }
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        let mut settings = match &cli.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(variant) = cli.variant()? {
            settings.variant = variant;
        }

        let level = match &settings.level_path {
            Some(path) => Level::load(path)?,
            None => Level::builtin(),
        };

        log::info!(
            "Tile Runner starting ({} variant, seed {}, {} ticks)",
            settings.variant.as_str(),
            settings.seed,
            settings.demo_ticks
        );

        let state = GameState::new(level, settings.variant.rules(), settings.seed);
        let mut game = Game::new(state, settings.idle_mode);

        // Headless: one displayed frame per simulation step
        while !game.finished(settings.demo_ticks) {
            game.update(SIM_DT, settings.demo_ticks);
        }

        let state = &game.state;
        log::info!(
            "Stopped after {} ticks in {:?} at ({:.1}, {:.1})",
            state.time_ticks,
            state.phase,
            state.player.pos().x,
            state.player.pos().y
        );

        if settings.print_frame {
            print!("{}", FrameView::capture(state).to_ascii(&state.tiles));
        }
        println!(
            "{} after {} ticks (x = {:.1} of {GOAL_X})",
            match state.phase {
                GamePhase::Playing => "Still playing",
                GamePhase::GameOver => "Game over",
                GamePhase::GameClear => "Game clear",
            },
            state.time_ticks,
            state.player.pos().x
        );
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No native runner on the web; the library is embedded by the host instead
}
