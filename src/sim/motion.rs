//! Motion point fields (node network and particle drift)
//!
//! One algorithm, two configurations: a fixed pool of points advances by its
//! velocity each frame, reflecting off the surface bounds, with proximity
//! links faded linearly to zero at the configured threshold.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Categorical point color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Cyan,
    Magenta,
}

impl Tint {
    /// CSS color channels for this tint
    pub fn rgb(self) -> &'static str {
        match self {
            Tint::Cyan => "0, 255, 255",
            Tint::Magenta => "255, 0, 255",
        }
    }
}

/// A single moving point. Pool members are created once at field init and
/// reused for the lifetime of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPoint {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub tint: Tint,
}

/// Parameters for one field instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub count: usize,
    /// Per-axis velocity is uniform in [-vel_span/2, vel_span/2) per frame
    pub vel_span: f32,
    pub radius_min: f32,
    pub radius_span: f32,
    /// Point opacity is `opacity_base + uniform[0, opacity_span)`
    pub opacity_base: f32,
    pub opacity_span: f32,
    /// Pair distance below which a link is drawn
    pub link_dist: f32,
    /// Link alpha at distance zero
    pub link_alpha: f32,
    /// Glow blur radius in px when rendered
    pub glow: f32,
    pub line_width: f32,
    /// Blend link color between both endpoint tints (vs flat first-endpoint)
    pub gradient_links: bool,
}

impl FieldConfig {
    /// Neural node overlay: few large glowing nodes, long gradient links
    pub fn nodes() -> Self {
        Self {
            count: NODE_COUNT,
            vel_span: 0.5,
            radius_min: 2.0,
            radius_span: 3.0,
            opacity_base: 0.8,
            opacity_span: 0.0,
            link_dist: NODE_LINK_DIST,
            link_alpha: NODE_LINK_ALPHA,
            glow: 15.0,
            line_width: 1.0,
            gradient_links: true,
        }
    }

    /// Background particle drift: many faint motes, short flat links
    pub fn particles() -> Self {
        Self {
            count: PARTICLE_COUNT,
            vel_span: 0.3,
            radius_min: 0.5,
            radius_span: 2.0,
            opacity_base: 0.0,
            opacity_span: 0.6,
            link_dist: PARTICLE_LINK_DIST,
            link_alpha: PARTICLE_LINK_ALPHA,
            glow: 10.0,
            line_width: 0.5,
            gradient_links: false,
        }
    }
}

/// A proximity link between two pool points, alpha already faded by distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub alpha: f32,
}

/// A fixed pool of drifting points inside a rectangular surface
#[derive(Debug, Clone)]
pub struct MotionField {
    pub config: FieldConfig,
    pub bounds: Vec2,
    pub points: Vec<MotionPoint>,
}

impl MotionField {
    /// Populate the pool with uniformly random positions inside the bounds,
    /// small random velocities, and a tint chosen uniformly from two values.
    pub fn new(config: FieldConfig, width: f32, height: f32, seed: u64) -> Self {
        let bounds = Vec2::new(width.max(1.0), height.max(1.0));
        let mut rng = Pcg32::seed_from_u64(seed);
        let points = (0..config.count)
            .map(|_| MotionPoint {
                pos: Vec2::new(
                    rng.random::<f32>() * bounds.x,
                    rng.random::<f32>() * bounds.y,
                ),
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * config.vel_span,
                    (rng.random::<f32>() - 0.5) * config.vel_span,
                ),
                radius: config.radius_min + rng.random::<f32>() * config.radius_span,
                opacity: config.opacity_base + rng.random::<f32>() * config.opacity_span,
                tint: if rng.random::<f32>() > 0.5 {
                    Tint::Cyan
                } else {
                    Tint::Magenta
                },
            })
            .collect();
        Self {
            config,
            bounds,
            points,
        }
    }

    /// Advance every point by one frame: position += velocity, with the
    /// velocity component negated on boundary exit. Positions are not
    /// clamped, so a point may overshoot the bounds for a single frame.
    pub fn step(&mut self) {
        for p in &mut self.points {
            p.pos += p.vel;
            if p.pos.x < 0.0 || p.pos.x > self.bounds.x {
                p.vel.x = -p.vel.x;
            }
            if p.pos.y < 0.0 || p.pos.y > self.bounds.y {
                p.vel.y = -p.vel.y;
            }
        }
    }

    /// All unordered pairs closer than the link threshold, with linear alpha
    /// falloff to zero at the threshold. O(n^2), acceptable for n <= 150.
    pub fn links(&self) -> Vec<Link> {
        let mut out = Vec::new();
        for i in 0..self.points.len() {
            for j in (i + 1)..self.points.len() {
                let d = self.points[i].pos.distance(self.points[j].pos);
                if d < self.config.link_dist {
                    out.push(Link {
                        a: i,
                        b: j,
                        alpha: (1.0 - d / self.config.link_dist) * self.config.link_alpha,
                    });
                }
            }
        }
        out
    }

    /// Reset the surface bounds after a viewport resize. Existing points are
    /// not rescaled; any now outside the new bounds reflect back in on the
    /// following steps.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width.max(1.0), height.max(1.0));
    }
}
