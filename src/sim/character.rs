//! The player's character
//!
//! Moves unconditionally; keeping it inside the field is the tick's job.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Animation row of the character sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimState {
    #[default]
    Idle,
    /// Moving right
    Forward,
    /// Moving left
    Backward,
    Up,
    Down,
}

impl AnimState {
    /// Frames in this animation row
    pub fn frame_count(&self) -> usize {
        match self {
            AnimState::Idle => 10,
            AnimState::Forward => 2,
            AnimState::Backward => 3,
            AnimState::Down => 4,
            AnimState::Up => 3,
        }
    }

    /// Milliseconds between frames
    pub fn frame_delay_ms(&self) -> u64 {
        match self {
            AnimState::Idle => 150,
            AnimState::Forward | AnimState::Backward => 200,
            AnimState::Up | AnimState::Down => 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    hp: u32,
    max_hp: u32,
    anim: AnimState,
    frame: usize,
    last_frame_ms: u64,
}

impl Character {
    pub fn new(pos: Vec2, size: f32, speed: f32, max_hp: u32) -> Self {
        Self {
            pos,
            size: Vec2::splat(size),
            speed,
            hp: max_hp,
            max_hp,
            anim: AnimState::Idle,
            frame: 0,
            last_frame_ms: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn move_up(&mut self) {
        self.pos.y -= self.speed;
        self.set_anim(AnimState::Up);
    }

    pub fn move_down(&mut self) {
        self.pos.y += self.speed;
        self.set_anim(AnimState::Down);
    }

    pub fn move_left(&mut self) {
        self.pos.x -= self.speed;
        self.set_anim(AnimState::Backward);
    }

    pub fn move_right(&mut self) {
        self.pos.x += self.speed;
        self.set_anim(AnimState::Forward);
    }

    pub fn set_idle(&mut self) {
        self.set_anim(AnimState::Idle);
    }

    /// Frame index resets only on an actual state change
    fn set_anim(&mut self, anim: AnimState) {
        if self.anim != anim {
            self.anim = anim;
            self.frame = 0;
        }
    }

    pub fn update_animation(&mut self, now_ms: u64) {
        if now_ms.saturating_sub(self.last_frame_ms) > self.anim.frame_delay_ms() {
            self.frame = (self.frame + 1) % self.anim.frame_count();
            self.last_frame_ms = now_ms;
        }
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn anim(&self) -> AnimState {
        self.anim
    }

    pub fn frame(&self) -> usize {
        self.frame
    }
}
