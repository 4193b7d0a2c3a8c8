//! Engine stack — a title screen over a game, with explicit tick outcomes.
//!
//! Two engines share one stack: the title screen counts down a few ticks and
//! pops itself; the game below then runs until its win condition fires and
//! requests termination. No exceptions, no flags in globals — every mode
//! change is a value returned from `update()`.
//!
//! Run with: `RUST_LOG=info cargo run -p wyrm --example stack`

use wyrm::prelude::*;

struct Gold(u32);

// ── Title screen ─────────────────────────────────────────────────────────

struct TitleSystem {
    remaining: u32,
}

impl System for TitleSystem {
    fn update(&mut self, ctx: &mut Context) {
        if self.remaining == 0 {
            log::info!("title screen dismissed");
            ctx.request(Tick::PopEngine);
        } else {
            log::info!("title screen ({} ticks left)", self.remaining);
            self.remaining -= 1;
        }
    }
}

fn title_engine() -> Engine {
    let mut engine = Engine::new();
    engine.add_system(TitleSystem { remaining: 3 }, 0);
    engine
}

// ── The game ─────────────────────────────────────────────────────────────

fn mining_system(ctx: &mut Context) {
    for miner in ctx.groups.members("miners") {
        if let Some(gold) = ctx.registry.get_component_mut::<Gold>(miner) {
            gold.0 += 7;
            log::info!("miner {miner} is at {} gold", gold.0);
        }
    }
}

fn win_condition(ctx: &mut Context) {
    let total: u32 = ctx.registry.components_of_type::<Gold>().iter().map(|g| g.0).sum();
    if total >= 40 {
        log::info!("hoard complete at {total} gold");
        ctx.request(Tick::Terminate);
    }
}

fn game_engine() -> Engine {
    let mut engine = Engine::new();
    engine.ctx.spawn().with(Gold(0)).group("miners");
    engine.ctx.spawn().with(Gold(0)).group("miners");
    engine.add_system(mining_system, 0);
    engine.add_system(win_condition, 10);
    engine
}

fn main() {
    env_logger::init();

    let mut stack = EngineStack::new();
    stack.push(game_engine());
    stack.push(title_engine());

    let mut ticks = 0u32;
    loop {
        ticks += 1;
        match stack.update() {
            Tick::Continue => {}
            Tick::PopEngine => println!("mode change on tick {ticks}"),
            Tick::Terminate => break,
        }
    }
    println!("done after {ticks} ticks");
}
