//! Homebound entry point
//!
//! Runs a headless session: aims the waypoint at home once, then ticks the
//! simulation until the chase resolves. A graphical shell would supply a
//! real `Surface` and live pointer events in place of the scripted click.

use homebound::Config;
use homebound::render::HeadlessSurface;
use homebound::sim::{GameState, TickInput, destroy, render, tick};

fn main() {
    env_logger::init();

    let config = Config::load("homebound.json");
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);

    let mut state = GameState::new(&config, seed);
    let mut surface = HeadlessSurface::default();
    state.start();

    // head straight home; the enemies decide how the run ends
    let mut input = TickInput {
        click: Some(state.home.pos),
    };
    while !state.phase.is_terminal() && state.time_ticks < 36_000 {
        tick(&mut state, &input);
        render(&mut state, &mut surface);
        input = TickInput::default();
    }

    log::info!(
        "Run ended after {} ticks: {:?}, {} enemies on the field",
        state.time_ticks,
        state.phase,
        state.enemies.len()
    );
    destroy(&mut state, &mut surface);
}
