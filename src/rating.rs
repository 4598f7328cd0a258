//! Star ratings: the read-only projection of an average rating, and the
//! hover/click input used on the detail screen.

pub const MAX_STARS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarKind {
    Full,
    Half,
    Empty,
}

impl StarKind {
    pub fn glyph(self) -> char {
        match self {
            StarKind::Full => '★',
            StarKind::Half => '⯪',
            StarKind::Empty => '☆',
        }
    }
}

/// Project `rating` onto `max` stars: whole part full, a non-zero fraction
/// one half star, the rest empty.
pub fn stars(rating: f32, max: u8) -> Vec<StarKind> {
    let rating = if rating.is_finite() {
        rating.clamp(0.0, f32::from(max))
    } else {
        0.0
    };
    let whole = rating.floor();
    let has_fraction = rating.fract() != 0.0;
    (0..max)
        .map(|i| {
            let i = f32::from(i);
            if i < whole {
                StarKind::Full
            } else if i == whole && has_fraction {
                StarKind::Half
            } else {
                StarKind::Empty
            }
        })
        .collect()
}

pub fn star_line(rating: f32) -> String {
    stars(rating, MAX_STARS)
        .into_iter()
        .map(StarKind::glyph)
        .collect()
}

pub fn summary_text(average: f32, count: u32) -> String {
    format!("({average} / 5) ({count} votes)")
}

/// Interactive rating: a committed value plus a transient hover preview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingInput {
    committed: u8,
    hover: Option<u8>,
}

impl RatingInput {
    pub fn new(initial: u8) -> Self {
        Self {
            committed: initial.min(MAX_STARS),
            hover: None,
        }
    }

    pub fn hover(&mut self, value: u8) {
        self.hover = Some(value.min(MAX_STARS));
    }

    pub fn leave(&mut self) {
        self.hover = None;
    }

    pub fn click(&mut self, value: u8) {
        self.committed = value.min(MAX_STARS);
        self.hover = None;
        tracing::info!(rating = self.committed, "book rated");
    }

    pub fn committed(&self) -> u8 {
        self.committed
    }

    /// What the stars show right now: the hover preview if any.
    pub fn displayed(&self) -> u8 {
        self.hover.unwrap_or(self.committed)
    }

    pub fn stars(&self) -> Vec<StarKind> {
        stars(f32::from(self.displayed()), MAX_STARS)
    }
}
