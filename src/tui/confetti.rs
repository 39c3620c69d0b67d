//! Cosmetic celebration effect for a perfect score. Pieces fall from above
//! the visible area and the animation self-terminates once every piece has
//! dropped past the bottom edge.

use rand::Rng;

const PIECE_COUNT: usize = 120;
const SYMBOLS: [char; 4] = ['▪', '▫', '•', '✦'];

#[derive(Debug, Clone)]
pub struct Piece {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Index into the theme's confetti palette
    pub color_idx: usize,
    pub symbol: char,
}

#[derive(Debug, Clone, Default)]
pub struct Confetti {
    pieces: Vec<Piece>,
    width: u16,
    height: u16,
}

impl Confetti {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a fresh burst of pieces scattered above the visible area
    pub fn launch(&mut self, width: u16, height: u16) {
        let mut rng = rand::thread_rng();
        self.width = width;
        self.height = height;
        self.pieces = (0..PIECE_COUNT)
            .map(|_| Piece {
                x: rng.gen_range(0.0..width.max(1) as f32),
                y: rng.gen_range(-(height.max(1) as f32)..0.0),
                vx: rng.gen_range(-0.3..0.3),
                vy: rng.gen_range(0.25..0.9),
                color_idx: rng.gen_range(0..7),
                symbol: SYMBOLS[rng.gen_range(0..SYMBOLS.len())],
            })
            .collect();
    }

    /// Advance one animation frame, culling pieces past the bottom edge
    pub fn step(&mut self) {
        if self.pieces.is_empty() {
            return;
        }
        let floor = self.height as f32;
        for p in &mut self.pieces {
            p.x += p.vx;
            p.y += p.vy;
        }
        self.pieces.retain(|p| p.y < floor + 1.0);
    }

    /// Adjust to a terminal resize without restarting the animation
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn is_active(&self) -> bool {
        !self.pieces.is_empty()
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    /// Pieces currently inside the visible area, as cell positions
    pub fn visible_pieces(&self) -> impl Iterator<Item = (u16, u16, usize, char)> + '_ {
        self.pieces.iter().filter_map(|p| {
            if p.x >= 0.0 && p.y >= 0.0 {
                let x = p.x as u16;
                let y = p.y as u16;
                if x < self.width && y < self.height {
                    return Some((x, y, p.color_idx, p.symbol));
                }
            }
            None
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_inactive() {
        let confetti = Confetti::new();
        assert!(!confetti.is_active());
    }

    #[test]
    fn test_launch_activates() {
        let mut confetti = Confetti::new();
        confetti.launch(80, 24);
        assert!(confetti.is_active());
    }

    #[test]
    fn test_animation_self_terminates() {
        let mut confetti = Confetti::new();
        confetti.launch(80, 24);
        // Every piece starts above the screen and falls at >= 0.25 cells per
        // step, so (24 + 24 + 1) / 0.25 steps is a safe upper bound.
        for _ in 0..500 {
            confetti.step();
        }
        assert!(!confetti.is_active());
    }

    #[test]
    fn test_pieces_fall_downward() {
        let mut confetti = Confetti::new();
        confetti.launch(80, 24);
        let before: Vec<f32> = confetti.pieces.iter().map(|p| p.y).collect();
        confetti.step();
        for (piece, y0) in confetti.pieces.iter().zip(before) {
            assert!(piece.y > y0);
        }
    }

    #[test]
    fn test_clear_stops_animation() {
        let mut confetti = Confetti::new();
        confetti.launch(80, 24);
        confetti.clear();
        assert!(!confetti.is_active());
        confetti.step();
        assert!(!confetti.is_active());
    }

    #[test]
    fn test_visible_pieces_within_bounds() {
        let mut confetti = Confetti::new();
        confetti.launch(40, 10);
        for _ in 0..30 {
            confetti.step();
            for (x, y, color_idx, _) in confetti.visible_pieces() {
                assert!(x < 40);
                assert!(y < 10);
                assert!(color_idx < 7);
            }
        }
    }
}
