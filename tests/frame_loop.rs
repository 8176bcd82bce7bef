//! End-to-end frame loop: host + game + headless surface + manual clock

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use scroller::audio::{Audio, AudioPlayer, SoundEffect};
use scroller::clock::ManualClock;
use scroller::input::{InputEvent, KeyCode, Modifiers};
use scroller::platform::headless::{HeadlessRunner, autopilot};
use scroller::renderer::{DrawCall, HeadlessSurface};
use scroller::sim::Actor;
use scroller::{AssetError, Behavior, Error, Host, ScriptContext, ScriptError, Scroller};

const FRAME: f64 = 1.0 / 60.0;

fn game(seed: u64) -> (Host<Scroller, ManualClock>, HeadlessSurface, ManualClock) {
    let clock = ManualClock::new();
    let mut host = Host::new(Scroller::with_seed(seed), clock.clone());
    let mut surface = HeadlessSurface::new(800, 600);
    host.init(&mut surface).unwrap();
    (host, surface, clock)
}

#[derive(Clone, Default)]
struct SoundLog(Rc<RefCell<Vec<SoundEffect>>>);

impl AudioPlayer for SoundLog {
    fn play(&mut self, effect: SoundEffect, _volume: f32) {
        self.0.borrow_mut().push(effect);
    }
}

#[test]
fn idle_ship_stays_put() {
    let (mut host, mut surface, clock) = game(1);
    for _ in 0..30 {
        host.frame(&mut surface).unwrap();
        clock.advance_secs(FRAME);
    }
    let ship = &host.behavior().world().unwrap().ship;
    assert_eq!(ship.pos, Vec2::new(400.0, 300.0));
    assert_eq!(ship.old_pos, ship.pos);
}

#[test]
fn fire_once_puts_bullet_at_muzzle() {
    let (mut host, mut surface, _clock) = game(1);
    let sounds = SoundLog::default();
    host.set_audio(Audio::with_player(Box::new(sounds.clone()), true));

    host.handle_event(&mut surface, &InputEvent::key_down(KeyCode::SPACE));
    host.frame(&mut surface).unwrap();

    let world = host.behavior().world().unwrap();
    let ship = &world.ship;
    assert_eq!(world.bullets.len(), 1);
    let bullet = &world.bullets[0];
    assert_eq!(
        bullet.pos,
        Vec2::new(400.0 + ship.size.x, 300.0 + ship.size.y / 2.0 - 2.5)
    );
    assert_eq!(bullet.vel, Vec2::new(16.0, 0.0));
    assert_eq!(*sounds.0.borrow(), vec![SoundEffect::Shot]);

    // Bullet is drawn as the frame's only flat quad
    assert!(surface
        .draw_calls()
        .contains(&DrawCall::Fill { vertices: 6 }));
}

#[test]
fn bullet_hits_enemy() {
    let (mut host, mut surface, _clock) = game(1);
    let sounds = SoundLog::default();
    host.set_audio(Audio::with_player(Box::new(sounds.clone()), true));

    {
        let world = host.behavior_mut().world_mut().unwrap();
        world.enemies.push(Actor::enemy(Vec2::new(600.0, 100.0)));
        world.bullets.push(Actor::bullet(Vec2::new(590.0, 120.0)));
    }
    host.frame(&mut surface).unwrap();

    let world = host.behavior().world().unwrap();
    assert!(world.enemies.is_empty());
    assert!(world.bullets.is_empty());
    assert_eq!(world.explosions.len(), 1);
    assert_eq!(world.particle_count(), 50);
    assert_eq!(*sounds.0.borrow(), vec![SoundEffect::Explosion]);
}

#[test]
fn explosion_burns_out() {
    let (mut host, mut surface, clock) = game(2);
    host.behavior_mut()
        .world_mut()
        .unwrap()
        .spawn_explosion(Vec2::new(100.0, 100.0));

    let mut last = host.behavior().world().unwrap().particle_count();
    for _ in 0..40 {
        host.frame(&mut surface).unwrap();
        clock.advance_secs(FRAME);
        let now = host.behavior().world().unwrap().particle_count();
        assert!(now <= last);
        last = now;
    }
    let world = host.behavior().world().unwrap();
    assert_eq!(world.particle_count(), 0);
    assert!(world.explosions.is_empty());
}

#[test]
fn pause_freezes_world_but_not_bookkeeping() {
    let (mut host, mut surface, clock) = game(3);
    host.handle_event(&mut surface, &InputEvent::key_down(KeyCode::RIGHT));
    for _ in 0..10 {
        host.frame(&mut surface).unwrap();
        clock.advance_secs(FRAME);
    }

    host.handle_event(&mut surface, &InputEvent::key_up(KeyCode::P));
    // One frame to settle the interpolation span
    host.frame(&mut surface).unwrap();
    clock.advance_secs(FRAME);

    let frozen = host.behavior().world().unwrap().clone();
    let steps = host.behavior().scheduler().total_steps();
    let pending = host.fps().pending_frames();

    for _ in 0..20 {
        host.frame(&mut surface).unwrap();
        clock.advance_secs(FRAME);
    }

    let world = host.behavior().world().unwrap();
    assert_eq!(world.ship, frozen.ship);
    assert_eq!(world.enemies, frozen.enemies);
    assert_eq!(world.background, frozen.background);
    assert_eq!(host.behavior().scheduler().total_steps(), steps + 20);
    assert_eq!(host.fps().pending_frames(), pending + 20);
}

#[test]
fn enemy_spawns_once_per_120_ticks() {
    let (mut host, mut surface, clock) = game(4);
    for _ in 0..120 {
        host.frame(&mut surface).unwrap();
        clock.advance_secs(FRAME);
    }
    let world = host.behavior().world().unwrap();
    assert_eq!(world.time_ticks, 120);
    assert_eq!(world.enemies.len(), 1);
    let y = world.enemies[0].pos.y;
    assert!((0.0..=536.0).contains(&y));
}

#[test]
fn fps_overlay_after_one_second() {
    let (mut host, mut surface, clock) = game(5);
    for _ in 0..62 {
        host.frame(&mut surface).unwrap();
        clock.advance_secs(FRAME);
    }
    assert_eq!(surface.overlay_text(), Some("FPS: 60"));
}

#[test]
fn long_stall_is_capped() {
    let (mut host, mut surface, clock) = game(6);
    host.frame(&mut surface).unwrap();
    clock.advance_secs(10.0);
    host.frame(&mut surface).unwrap();

    let scheduler = host.behavior().scheduler();
    assert_eq!(scheduler.total_steps(), 1 + 240);
    assert!(scheduler.game_time() > 10.0);
}

#[test]
fn same_seed_same_run() {
    let run = |seed| {
        let (mut host, mut surface, _clock) = game(seed);
        HeadlessRunner::new(400, 75.0)
            .with_inputs(autopilot(400, 12))
            .run(&mut host, &mut surface)
            .unwrap();
        let world = host.behavior().world().unwrap();
        (
            world.enemies.clone(),
            world.bullets.clone(),
            world.particle_count(),
        )
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn quit_chord_with_ctrl() {
    let (mut host, mut surface, _clock) = game(7);
    let ctrl_q = InputEvent::KeyDown {
        key: KeyCode::Q,
        modifiers: Modifiers::CTRL,
        repeat: false,
    };
    assert!(host.handle_event(&mut surface, &ctrl_q));
    assert!(host.quit_requested());
}

#[test]
fn shutdown_releases_all_images() {
    let (mut host, mut surface, _clock) = game(8);
    assert_eq!(surface.live_images(), 3);
    host.shutdown(&mut surface);
    assert_eq!(surface.live_images(), 0);
    assert_eq!(surface.destroyed_images().len(), 3);
}

/// Behavior that exercises the drawing API directly
#[derive(Default)]
struct TwoImages {
    a: usize,
    b: usize,
    fail_frames: bool,
    widths: Vec<u32>,
}

impl Behavior for TwoImages {
    fn on_init(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        self.a = ctx.load_image("ship")?;
        self.b = ctx.load_image("enemy")?;
        Ok(())
    }

    fn on_frame(
        &mut self,
        ctx: &mut ScriptContext<'_>,
        _width: u32,
        _height: u32,
        _elapsed: f64,
    ) -> Result<(), ScriptError> {
        if self.fail_frames {
            ctx.draw_fill_px(0.0, 0.0, 4.0, 4.0, 1.0, 0.0, 0.0, 1.0);
            return Err(ScriptError::msg("boom"));
        }
        ctx.draw_blit_px(self.a, 0.0, 0.0, 10.0, 10.0);
        ctx.draw_blit_px(self.b, 20.0, 0.0, 10.0, 10.0);
        ctx.draw_blit_px(self.a, 40.0, 0.0, 10.0, 10.0);
        // Unknown index: logged, nothing drawn
        ctx.draw_blit_px(99, 0.0, 0.0, 10.0, 10.0);
        self.widths = vec![ctx.image_width(self.b), ctx.image_width(99), ctx.image_height(99)];
        Ok(())
    }
}

#[test]
fn three_quads_two_images_two_calls() {
    let clock = ManualClock::new();
    let mut host = Host::new(TwoImages::default(), clock);
    let mut surface = HeadlessSurface::new(800, 600);
    host.init(&mut surface).unwrap();
    host.frame(&mut surface).unwrap();

    let calls = surface.draw_calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0], DrawCall::Blit { vertices: 12, .. }));
    assert!(matches!(calls[1], DrawCall::Blit { vertices: 6, .. }));
    assert_eq!(host.behavior().widths, vec![64, 0, 0]);
}

#[test]
fn frame_error_keeps_queued_draws() {
    let mut host = Host::new(
        TwoImages {
            fail_frames: true,
            ..Default::default()
        },
        ManualClock::new(),
    );
    let mut surface = HeadlessSurface::new(800, 600);
    host.init(&mut surface).unwrap();
    host.frame(&mut surface).unwrap();
    host.frame(&mut surface).unwrap();

    assert_eq!(surface.frames_presented(), 2);
    assert_eq!(surface.draw_calls(), &[DrawCall::Fill { vertices: 6 }]);
}

struct MissingAsset;

impl Behavior for MissingAsset {
    fn on_init(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        ctx.load_image("no-such-image.png")?;
        Ok(())
    }

    fn on_frame(
        &mut self,
        _ctx: &mut ScriptContext<'_>,
        _width: u32,
        _height: u32,
        _elapsed: f64,
    ) -> Result<(), ScriptError> {
        Ok(())
    }
}

#[test]
fn init_error_is_fatal() {
    let mut host = Host::new(MissingAsset, ManualClock::new());
    let mut surface = HeadlessSurface::new(800, 600);
    let err = host.init(&mut surface).unwrap_err();
    assert!(matches!(
        err,
        Error::Script(ScriptError::Asset(AssetError::NotFound(_)))
    ));
}
