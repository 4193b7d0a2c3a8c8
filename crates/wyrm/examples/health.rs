//! Health drain — the smallest complete wyrm program.
//!
//! A factory spawns a handful of creatures with `Health` (some also get a
//! `Sprite`), a poison system drains hit points every tick, and a reaper
//! system despawns whatever reaches zero. When the last creature is gone the
//! reaper requests `Tick::Terminate` and the loop ends.
//!
//! Run with: `RUST_LOG=info cargo run -p wyrm --example health`

use wyrm::prelude::*;

#[derive(Debug)]
struct Health {
    current: i32,
    max: i32,
}

struct Sprite {
    glyph: char,
}

// ── Factory ──────────────────────────────────────────────────────────────

struct CreatureFactory;

impl CreatureFactory {
    fn spawn_creature(&mut self, ctx: &mut Context, hp: i32, glyph: Option<char>) -> Entity {
        let builder = ctx.spawn().with(Health { current: hp, max: hp }).group("creatures");
        let builder = match glyph {
            Some(glyph) => builder.with(Sprite { glyph }),
            None => builder,
        };
        builder.id()
    }
}

impl EntityFactory for CreatureFactory {
    fn bind(&mut self, ctx: &mut Context) {
        self.spawn_creature(ctx, 9, Some('S'));
        self.spawn_creature(ctx, 5, Some('r'));
        self.spawn_creature(ctx, 3, None); // something invisible in the walls
    }
}

// ── Systems ──────────────────────────────────────────────────────────────

struct PoisonSystem {
    damage: i32,
}

impl System for PoisonSystem {
    fn update(&mut self, ctx: &mut Context) {
        for entity in ctx.registry.entities_with::<Health>() {
            if let Some(health) = ctx.registry.get_component_mut::<Health>(entity) {
                health.current -= self.damage;
                log::info!(
                    "entity {entity}: {}/{} hp",
                    health.current.max(0),
                    health.max
                );
            }
        }
    }
}

/// Despawns everything at zero hp; terminates once nothing is left.
fn reaper(ctx: &mut Context) {
    let dead: Vec<Entity> = ctx
        .registry
        .entities_with::<Health>()
        .into_iter()
        .filter(|&e| {
            ctx.registry
                .get_component::<Health>(e)
                .is_some_and(|h| h.current <= 0)
        })
        .collect();

    for entity in dead {
        let glyph = ctx
            .registry
            .get_component::<Sprite>(entity)
            .map(|s| s.glyph)
            .unwrap_or('?');
        log::info!("entity {entity} ('{glyph}') died");
        ctx.despawn(entity).expect("reaper only despawns live entities");
    }

    if !ctx.groups.is_populated("creatures") {
        ctx.request(Tick::Terminate);
    }
}

fn main() {
    env_logger::init();

    let mut engine = Engine::with_factory(CreatureFactory);
    engine.add_system(PoisonSystem { damage: 2 }, 1);
    engine.add_system(reaper, 10);

    let visible = engine.ctx.registry.entities_with_all::<(Health, Sprite)>();
    println!(
        "{} creatures, {} of them visible",
        engine.ctx.groups.members("creatures").len(),
        visible.len()
    );

    let mut ticks = 0u32;
    while engine.update() != Tick::Terminate {
        ticks += 1;
    }
    println!("everything dead after {} ticks", ticks + 1);
}
