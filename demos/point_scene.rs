//=========================================================================
// Point Scene Demo
//=========================================================================
//
// A ring of points orbiting the window center, viewed through a camera
// that follows a moving anchor.
//
// Controls:
//   Arrow keys (hold)  tilt / turn the camera
//   Space              spawn another ring
//   Escape             quit
//
// Run with `RUST_LOG=debug cargo run --example point_scene`.
//
//=========================================================================

use little_engine::core::graphics::Frame;
use little_engine::prelude::*;
use log::info;

//=== Keys ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum DemoScene {
    Orbit,
}

impl SceneKey for DemoScene {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum DemoAction {
    TiltUp,
    TiltDown,
    TurnLeft,
    TurnRight,
    Spawn,
    Quit,
}

impl Action for DemoAction {}

//=== Objects =============================================================

/// Points spread evenly on a circle, rotating around its center.
struct Ring {
    center: Point,
    radius: f64,
    count: usize,
    angle: f64,
    color: Color,
}

impl GameObject for Ring {
    fn update(&mut self, ctx: &UpdateContext<'_>) {
        self.angle = (self.angle + ctx.tick * 20.0) % 360.0;
    }

    fn draw(&self, graphics: &mut Graphics) {
        let step = 360.0 / self.count as f64;
        let start = Point::new(self.center.x + self.radius, self.center.y, self.center.z);
        let points: Vec<Point> = (0..self.count)
            .map(|i| start.rotate(self.angle + step * i as f64, &self.center))
            .collect();
        graphics.pixels(&points, &DrawOptions::color(self.color));
    }
}

/// Drifts the camera anchor back and forth along x.
struct Drifter {
    anchor: FocusAnchor,
    home: Point,
    phase: f64,
}

impl GameObject for Drifter {
    fn update(&mut self, ctx: &UpdateContext<'_>) {
        self.phase = (self.phase + ctx.tick * 5.0) % 360.0;
        let offset = self.phase.to_radians().sin() * 40.0;
        self.anchor.set(Point::new(self.home.x + offset, self.home.y, self.home.z));
    }
}

//=== Scene Script ========================================================

struct Orbit {
    tilt: f64,
    turn: f64,
    rings: usize,
}

impl Orbit {
    fn new() -> Self {
        Self { tilt: 0.0, turn: 0.0, rings: 0 }
    }

    fn spawn_ring(&mut self, ctx: &mut SceneContext<'_, DemoScene, DemoAction>) {
        const PALETTE: [Color; 4] = [Color::CYAN, Color::YELLOW, Color::MAGENTA, Color::GREEN];

        let center = Point::xy(ctx.camera.width() / 2.0, ctx.camera.height() / 2.0);
        let ring = Ring {
            center,
            radius: 40.0 + 25.0 * self.rings as f64,
            count: 12 + 4 * self.rings,
            angle: 0.0,
            color: PALETTE[self.rings % PALETTE.len()],
        };
        ctx.groups.push(ring, Some(GroupKey::from("rings")));
        self.rings += 1;
        info!("Spawned ring #{}", self.rings);
    }
}

impl SceneScript<DemoScene, DemoAction> for Orbit {
    fn on_enter(&mut self, ctx: &mut SceneContext<'_, DemoScene, DemoAction>) {
        ctx.input_map.bind_hold(KeyCode::ArrowUp, DemoAction::TiltUp);
        ctx.input_map.bind_hold(KeyCode::ArrowDown, DemoAction::TiltDown);
        ctx.input_map.bind_hold(KeyCode::ArrowLeft, DemoAction::TurnLeft);
        ctx.input_map.bind_hold(KeyCode::ArrowRight, DemoAction::TurnRight);
        ctx.input_map.bind(KeyCode::Space, DemoAction::Spawn);
        ctx.input_map.bind(KeyCode::Escape, DemoAction::Quit);

        ctx.groups.insert_group(GroupKey::from("rings"), 1);
        self.spawn_ring(ctx);

        let home = Point::xy(ctx.camera.width() / 2.0, ctx.camera.height() / 2.0);
        let anchor = FocusAnchor::new(home);
        ctx.camera.set_focus(&anchor);
        ctx.groups.push(Drifter { anchor, home, phase: 0.0 }, None);
    }

    fn on_action(
        &mut self,
        action: DemoAction,
        _args: &InputArgs,
        ctx: &mut SceneContext<'_, DemoScene, DemoAction>,
    ) {
        match action {
            DemoAction::TiltUp => self.tilt += 1.0,
            DemoAction::TiltDown => self.tilt -= 1.0,
            DemoAction::TurnLeft => self.turn -= 1.0,
            DemoAction::TurnRight => self.turn += 1.0,
            DemoAction::Spawn => {
                self.spawn_ring(ctx);
                return;
            }
            DemoAction::Quit => {
                ctx.control.end_game();
                return;
            }
        }
        ctx.camera.tilt_turn(self.tilt, self.turn);
    }

    fn on_exit(&mut self, ctx: &mut SceneContext<'_, DemoScene, DemoAction>) {
        ctx.camera.clear_focus();
        info!("Leaving orbit with {} rings", self.rings);
    }
}

//=== Renderer ============================================================

/// Logs a frame summary every few seconds; there is no pixel backend.
struct SummaryRenderer {
    frames: u64,
}

impl Renderer for SummaryRenderer {
    fn present(&mut self, frame: &Frame) {
        self.frames += 1;
        if self.frames % 300 == 0 {
            info!("Frame {}: {} draw commands", self.frames, frame.len());
        }
    }
}

//=== Entry Point =========================================================

fn main() -> Result<(), EngineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    EngineBuilder::<DemoScene, DemoAction>::new()
        .with_config(config)
        .with_title("Point Scene")
        .with_show_fps(true)
        .build()
        .init(|game| {
            game.set_renderer(SummaryRenderer { frames: 0 });
            game.register_scene(DemoScene::Orbit, || Box::new(Orbit::new()));
            game.change_scene(DemoScene::Orbit);
        })
        .run()
}
