#![forbid(unsafe_code)]

//! Flex layout: split a rectangle along one axis by constraints.

use std::cmp::min;

use crate::geometry::Rect;

/// A size constraint for one slot of a [`Flex`] layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// An exact size in cells.
    Fixed(u16),
    /// At least this many cells, then grow.
    Min(u16),
    /// A ratio of the remaining space (numerator, denominator).
    Ratio(u32, u32),
}

/// The direction to lay items out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

/// A one-dimensional constraint layout.
#[derive(Debug, Clone, Default)]
pub struct Flex {
    direction: Direction,
    constraints: Vec<Constraint>,
}

impl Flex {
    pub fn vertical() -> Self {
        Self {
            direction: Direction::Vertical,
            ..Default::default()
        }
    }

    pub fn horizontal() -> Self {
        Self {
            direction: Direction::Horizontal,
            ..Default::default()
        }
    }

    pub fn constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints = constraints.into_iter().collect();
        self
    }

    /// Split `area` into one rectangle per constraint.
    ///
    /// Sizes never exceed the available space; when space runs out, trailing
    /// slots get zero size. With at least one `Min` or `Ratio` slot the sizes
    /// add up to the whole axis.
    pub fn split(&self, area: Rect) -> Vec<Rect> {
        if area.is_empty() {
            return self.constraints.iter().map(|_| Rect::default()).collect();
        }

        let available = match self.direction {
            Direction::Horizontal => area.width,
            Direction::Vertical => area.height,
        };
        let sizes = self.solve_constraints(available);
        self.sizes_to_rects(area, &sizes)
    }

    fn solve_constraints(&self, available: u16) -> Vec<u16> {
        let mut sizes = vec![0u16; self.constraints.len()];
        let mut remaining = available;
        let mut grow = Vec::new();

        for (i, &constraint) in self.constraints.iter().enumerate() {
            match constraint {
                Constraint::Fixed(size) => {
                    sizes[i] = min(size, remaining);
                    remaining -= sizes[i];
                }
                Constraint::Min(size) => {
                    sizes[i] = min(size, remaining);
                    remaining -= sizes[i];
                    grow.push(i);
                }
                Constraint::Ratio(_, _) => grow.push(i),
            }
        }

        if remaining > 0 && !grow.is_empty() {
            let weight = |c: Constraint| match c {
                Constraint::Ratio(n, d) => n as u64 * 100 / d.max(1) as u64,
                _ => 100,
            };
            let total_weight = grow
                .iter()
                .map(|&i| weight(self.constraints[i]))
                .sum::<u64>()
                .max(1);

            let pool = remaining;
            let mut allocated = 0u16;
            for (n, &i) in grow.iter().enumerate() {
                // Last slot absorbs rounding so the sizes sum exactly.
                let share = if n == grow.len() - 1 {
                    pool - allocated
                } else {
                    let s = (pool as u64 * weight(self.constraints[i]) / total_weight) as u16;
                    min(s, pool - allocated)
                };
                sizes[i] += share;
                allocated += share;
            }
        }

        sizes
    }

    fn sizes_to_rects(&self, area: Rect, sizes: &[u16]) -> Vec<Rect> {
        let mut pos = match self.direction {
            Direction::Horizontal => area.x,
            Direction::Vertical => area.y,
        };

        sizes
            .iter()
            .map(|&size| {
                let rect = match self.direction {
                    Direction::Horizontal => Rect::new(pos, area.y, size, area.height),
                    Direction::Vertical => Rect::new(area.x, pos, area.width, size),
                };
                pos = pos.saturating_add(size);
                rect
            })
            .collect()
    }
}
