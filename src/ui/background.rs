// src/ui/background.rs
//! Falling star field drawn behind the main window content.
//!
//! The field runs on frame time (seconds since start, as reported by egui)
//! and has no connection to the analysis flow.

use eframe::egui;
use rand::prelude::*;
use rand_distr::{Distribution, Uniform};

use crate::config::BackgroundSettings;

const SIZE_RANGE: (f32, f32) = (1.0, 4.0);
const LIFETIME_RANGE: (f64, f64) = (8.0, 18.0);

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Horizontal position as a fraction of the available width.
    pub x: f32,
    pub size: f32,
    pub born: f64,
    pub lifetime: f64,
}

impl Star {
    /// How far the star has fallen, 0 at spawn and 1 at expiry.
    pub fn progress(&self, now: f64) -> f32 {
        ((now - self.born) / self.lifetime).clamp(0.0, 1.0) as f32
    }

    pub fn is_expired(&self, now: f64) -> bool {
        now - self.born >= self.lifetime
    }
}

#[derive(Debug)]
pub struct StarField {
    stars: Vec<Star>,
    rng: StdRng,
    x_dist: Uniform<f32>,
    size_dist: Uniform<f32>,
    lifetime_dist: Uniform<f64>,
    initial_count: usize,
    initial_spawned: usize,
    initial_stagger: f64,
    spawn_interval: f64,
    started_at: Option<f64>,
    next_spawn: f64,
    active: bool,
}

impl StarField {
    pub fn new(settings: &BackgroundSettings, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            stars: Vec::new(),
            rng,
            x_dist: Uniform::new(0.0, 1.0),
            size_dist: Uniform::new(SIZE_RANGE.0, SIZE_RANGE.1),
            lifetime_dist: Uniform::new(LIFETIME_RANGE.0, LIFETIME_RANGE.1),
            initial_count: settings.initial_stars,
            initial_spawned: 0,
            initial_stagger: settings.initial_stagger_ms as f64 / 1000.0,
            spawn_interval: (settings.spawn_interval_ms.max(1)) as f64 / 1000.0,
            started_at: None,
            next_spawn: 0.0,
            active: settings.enabled,
        }
    }

    #[cfg(test)]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Spawns due stars and drops expired ones.
    pub fn tick(&mut self, now: f64) {
        if !self.active {
            return;
        }

        let started_at = *self.started_at.get_or_insert_with(|| {
            self.next_spawn = now + self.spawn_interval;
            now
        });

        while self.initial_spawned < self.initial_count {
            let due = started_at + self.initial_spawned as f64 * self.initial_stagger;
            if due > now {
                break;
            }
            self.spawn(due);
            self.initial_spawned += 1;
        }

        // After a long pause only catch up on stars that would still be visible
        if now - self.next_spawn > LIFETIME_RANGE.1 {
            self.next_spawn = now - LIFETIME_RANGE.1;
        }
        while self.next_spawn <= now {
            let due = self.next_spawn;
            self.spawn(due);
            self.next_spawn += self.spawn_interval;
        }

        self.stars.retain(|star| !star.is_expired(now));
    }

    /// Stops spawning and removes every star.
    pub fn teardown(&mut self) {
        self.active = false;
        self.stars.clear();
    }

    fn spawn(&mut self, born: f64) {
        let star = Star {
            x: self.x_dist.sample(&mut self.rng),
            size: self.size_dist.sample(&mut self.rng),
            born,
            lifetime: self.lifetime_dist.sample(&mut self.rng),
        };
        self.stars.push(star);
    }

    pub fn paint(&self, painter: &egui::Painter, rect: egui::Rect, now: f64) {
        for star in &self.stars {
            let progress = star.progress(now);
            let pos = egui::pos2(
                rect.left() + star.x * rect.width(),
                rect.top() + progress * rect.height(),
            );
            // fade in and out at the ends of the fall, with a slight twinkle
            let fade = (progress * 10.0).min(1.0) * ((1.0 - progress) * 10.0).min(1.0);
            let twinkle = 0.75 + 0.25 * ((now as f32 + star.x * 40.0) * 3.0).sin();
            let alpha = (fade * twinkle * 255.0) as u8;
            painter.circle_filled(
                pos,
                star.size / 2.0,
                egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha),
            );
        }
    }
}
