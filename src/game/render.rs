//! Rendering collaborator interface
//!
//! The core never draws. Each live entity translates itself into
//! primitive shapes tagged with what they depict, and hands them to a
//! [`Surface`] supplied by the caller.

use crate::game::enemy::{Enemy, EnemyKind};
use crate::game::pickup::{Pickup, PickupKind};
use crate::game::player::Player;
use crate::game::projectile::Projectile;
use crate::game::weapons::effects::{Beam, Effect, Orbital, Turret, Wave, Zone};
use crate::game::weapons::{Weapon, WeaponKind};
use crate::util::vec2::Vec2;

const HEALTH_BAR_HEIGHT: f32 = 4.0;
const HEALTH_BAR_GAP: f32 = 6.0;
const ORBITAL_RADIUS: f32 = 10.0;
const TURRET_RADIUS: f32 = 8.0;
const BEAM_WIDTH: f32 = 4.0;

/// What a shape depicts; the surface picks colours and sprites from this
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Player,
    /// Player while damage is being ignored
    PlayerInvincible,
    Enemy(EnemyKind),
    HealthBar,
    Projectile(Option<WeaponKind>),
    EnemyShot,
    Gem,
    HealthPack,
    Chest,
    Zone(WeaponKind),
    Orbital(WeaponKind),
    Beam(WeaponKind),
    Wave(WeaponKind),
    Turret(WeaponKind),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    Ring { center: Vec2, radius: f32, width: f32 },
    Line { from: Vec2, to: Vec2, width: f32 },
    /// Sector of a circle between two angles
    Arc { center: Vec2, radius: f32, start: f32, end: f32 },
    /// Horizontal bar; `fill` in 0..1
    Bar { top_left: Vec2, width: f32, height: f32, fill: f32 },
}

/// Drawing target provided by the rendering collaborator
pub trait Surface {
    fn draw(&mut self, kind: DrawKind, shape: Shape);
}

/// Anything that knows how to present itself on a [`Surface`]
pub trait Render {
    fn render<S: Surface + ?Sized>(&self, surface: &mut S);
}

/// Surface that records every draw call in order
#[derive(Debug, Default)]
pub struct DrawList {
    pub calls: Vec<(DrawKind, Shape)>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = DrawKind> + '_ {
        self.calls.iter().map(|(kind, _)| *kind)
    }
}

impl Surface for DrawList {
    fn draw(&mut self, kind: DrawKind, shape: Shape) {
        self.calls.push((kind, shape));
    }
}

impl Render for Player {
    fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let kind = if self.is_invincible() {
            DrawKind::PlayerInvincible
        } else {
            DrawKind::Player
        };
        surface.draw(
            kind,
            Shape::Circle {
                center: self.position,
                radius: self.radius,
            },
        );
    }
}

impl Render for Enemy {
    fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.draw(
            DrawKind::Enemy(self.kind),
            Shape::Circle {
                center: self.position,
                radius: self.radius,
            },
        );
        if self.health < self.max_health {
            let width = self.radius * 2.0;
            surface.draw(
                DrawKind::HealthBar,
                Shape::Bar {
                    top_left: self.position - Vec2::new(self.radius, self.radius + HEALTH_BAR_GAP),
                    width,
                    height: HEALTH_BAR_HEIGHT,
                    fill: self.health_fraction(),
                },
            );
        }
    }
}

impl Render for Projectile {
    fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let kind = if self.is_hostile() {
            DrawKind::EnemyShot
        } else {
            DrawKind::Projectile(self.source)
        };
        surface.draw(
            kind,
            Shape::Circle {
                center: self.position,
                radius: self.radius,
            },
        );
    }
}

impl Render for Pickup {
    fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let kind = match self.kind {
            PickupKind::ExperienceGem { .. } => DrawKind::Gem,
            PickupKind::HealthPack { .. } => DrawKind::HealthPack,
            PickupKind::Chest => DrawKind::Chest,
        };
        surface.draw(
            kind,
            Shape::Circle {
                center: self.position,
                radius: self.radius,
            },
        );
    }
}

/// Weapon effects need the player's position for orbiting bodies
pub fn render_weapon<S: Surface + ?Sized>(weapon: &Weapon, center: Vec2, surface: &mut S) {
    let kind = weapon.kind();
    for effect in weapon.effects() {
        match effect {
            Effect::Zone(zone) => render_zone(kind, zone, surface),
            Effect::Orbital(orbital) => render_orbital(kind, orbital, center, surface),
            Effect::Beam(beam) => render_beam(kind, beam, surface),
            Effect::Wave(wave) => render_wave(kind, wave, surface),
        }
    }
    for turret in weapon.turrets() {
        render_turret(kind, turret, surface);
    }
}

fn render_zone<S: Surface + ?Sized>(kind: WeaponKind, zone: &Zone, surface: &mut S) {
    surface.draw(
        DrawKind::Zone(kind),
        Shape::Circle {
            center: zone.center,
            radius: zone.radius,
        },
    );
}

fn render_orbital<S: Surface + ?Sized>(kind: WeaponKind, orbital: &Orbital, center: Vec2, surface: &mut S) {
    surface.draw(
        DrawKind::Orbital(kind),
        Shape::Circle {
            center: orbital.position(center),
            radius: ORBITAL_RADIUS,
        },
    );
}

fn render_beam<S: Surface + ?Sized>(kind: WeaponKind, beam: &Beam, surface: &mut S) {
    let shape = if beam.half_arc > 0.0 {
        Shape::Arc {
            center: beam.origin,
            radius: beam.length,
            start: beam.angle - beam.half_arc,
            end: beam.angle + beam.half_arc,
        }
    } else {
        Shape::Line {
            from: beam.origin,
            to: beam.end(),
            width: BEAM_WIDTH,
        }
    };
    surface.draw(DrawKind::Beam(kind), shape);
}

fn render_wave<S: Surface + ?Sized>(kind: WeaponKind, wave: &Wave, surface: &mut S) {
    surface.draw(
        DrawKind::Wave(kind),
        Shape::Ring {
            center: wave.center,
            radius: wave.radius,
            width: wave.band.max(1.0),
        },
    );
}

fn render_turret<S: Surface + ?Sized>(kind: WeaponKind, turret: &Turret, surface: &mut S) {
    surface.draw(
        DrawKind::Turret(kind),
        Shape::Circle {
            center: turret.position,
            radius: TURRET_RADIUS,
        },
    );
}
