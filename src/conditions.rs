//! Survival predicates (§4.8) and the renderer-facing error metric.
//!
//! spec.md leaves the exact survival formula as a pluggable, composable
//! choice (an Open Question): this module exposes the primitive
//! predicates from `original_source/src/conditions.cpp` plus a small
//! combinator type so callers can build new formulas without touching the
//! kernel.

use crate::agent::Agent;
use crate::config::Config;

/// A boxed, composable `Agent` predicate.
pub struct Predicate(Box<dyn Fn(&Agent, &Config) -> bool + Send + Sync>);

impl Predicate {
    pub fn new(f: impl Fn(&Agent, &Config) -> bool + Send + Sync + 'static) -> Self {
        Predicate(Box::new(f))
    }

    pub fn eval(&self, agent: &Agent, cfg: &Config) -> bool {
        (self.0)(agent, cfg)
    }

    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::new(move |a, c| self.eval(a, c) && other.eval(a, c))
    }

    pub fn or(self, other: Predicate) -> Predicate {
        Predicate::new(move |a, c| self.eval(a, c) || other.eval(a, c))
    }

    pub fn not(self) -> Predicate {
        Predicate::new(move |a, c| !self.eval(a, c))
    }
}

// --- rectangular windows -----------------------------------------------

pub fn centre_box(fraction: f64) -> Predicate {
    Predicate::new(move |a, c| {
        let p = a.position();
        let lo = 0.5 - fraction / 2.0;
        let hi = 0.5 + fraction / 2.0;
        let valid_x = p.x > c.screen_width * lo && p.x < c.screen_width * hi;
        let valid_y = p.y > c.screen_height * lo && p.y < c.screen_height * hi;
        valid_x && valid_y
    })
}

pub fn centre_third_box() -> Predicate {
    centre_box(1.0 / 3.0)
}

pub fn centre_fifth_box() -> Predicate {
    centre_box(1.0 / 5.0)
}

pub fn centre_tenth_box() -> Predicate {
    centre_box(1.0 / 10.0)
}

/// A box of the given fractional width/height, positioned with its centre
/// at `(cx_frac, cy_frac)` of the screen — generalises the historical
/// off-centre tenth boxes.
pub fn off_centre_box(cx_frac: f64, cy_frac: f64, fraction: f64) -> Predicate {
    Predicate::new(move |a, c| {
        let p = a.position();
        let half = fraction / 2.0;
        let valid_x = p.x > c.screen_width * (cx_frac - half) && p.x < c.screen_width * (cx_frac + half);
        let valid_y = p.y > c.screen_height * (cy_frac - half) && p.y < c.screen_height * (cy_frac + half);
        valid_x && valid_y
    })
}

// --- corner circles ------------------------------------------------------

fn corner_circle(corner_x: f64, corner_y: f64) -> Predicate {
    Predicate::new(move |a, c| {
        let p = a.position();
        let dx = p.x - corner_x * c.screen_width;
        let dy = p.y - corner_y * c.screen_height;
        (dx * dx + dy * dy).sqrt() < c.screen_width / 8.0
    })
}

pub fn top_left_circle() -> Predicate {
    corner_circle(0.0, 0.0)
}

pub fn top_right_circle() -> Predicate {
    corner_circle(1.0, 0.0)
}

pub fn bottom_left_circle() -> Predicate {
    corner_circle(0.0, 1.0)
}

pub fn bottom_right_circle() -> Predicate {
    corner_circle(1.0, 1.0)
}

pub fn top_corners() -> Predicate {
    top_left_circle().or(top_right_circle())
}

pub fn bottom_corners() -> Predicate {
    bottom_left_circle().or(bottom_right_circle())
}

pub fn any_corner() -> Predicate {
    top_corners().or(bottom_corners())
}

// --- border bands ---------------------------------------------------------

pub fn left_right_tenth() -> Predicate {
    Predicate::new(|a, c| {
        let p = a.position();
        p.x < c.screen_width * 0.01 || p.x > c.screen_width * 0.09
    })
}

pub fn top_bottom_tenth() -> Predicate {
    Predicate::new(|a, c| {
        let p = a.position();
        p.y < c.screen_height * 0.01 || p.y > c.screen_height * 0.09
    })
}

// --- velocity thresholds ---------------------------------------------------

pub fn low_velocity() -> Predicate {
    Predicate::new(|a, c| a.velocity() < c.max_velocity / 10.0)
}

pub fn has_velocity() -> Predicate {
    Predicate::new(|a, _c| a.velocity() > 0.001)
}

// --- colour dominance -------------------------------------------------------

pub fn is_red() -> Predicate {
    Predicate::new(|a, _c| {
        let col = a.colour();
        (col.r as f64 / 2.0) > col.g as f64 && (col.r as f64 / 2.0) > col.b as f64
    })
}

pub fn is_green() -> Predicate {
    Predicate::new(|a, _c| {
        let col = a.colour();
        (col.g as f64 / 2.0) > col.r as f64 && (col.g as f64 / 2.0) > col.b as f64
    })
}

pub fn is_blue() -> Predicate {
    Predicate::new(|a, _c| {
        let col = a.colour();
        (col.b as f64 / 2.0) > col.r as f64 && (col.b as f64 / 2.0) > col.g as f64
    })
}

// --- size bins -------------------------------------------------------------

pub fn is_large() -> Predicate {
    Predicate::new(|a, c| a.size() > c.min_size + (c.max_size - c.min_size) * 0.8)
}

pub fn is_small() -> Predicate {
    Predicate::new(|a, c| a.size() < c.min_size + (c.max_size - c.min_size) * 0.2)
}

// --- bounds & striping -------------------------------------------------------

pub fn in_bounds() -> Predicate {
    Predicate::new(|a, c| a.in_bounds(c))
}

pub fn horiz_tenths() -> Predicate {
    Predicate::new(|a, _c| (a.position().x / 10.0).round() as i64 % 2 == 0)
}

pub fn vert_tenths() -> Predicate {
    Predicate::new(|a, _c| (a.position().y / 10.0).round() as i64 % 2 == 0)
}

/// The composed default survival formula, reconstructed from
/// `original_source/src/conditions.cpp::LiveStrategy`: small agents that
/// have also reached a top corner while red, or a bottom corner while
/// green.
pub static DEFAULT_SURVIVAL: Lazy<Predicate> = Lazy::new(|| {
    is_small().and(
        top_corners()
            .and(is_red())
            .or(bottom_corners().and(is_green())),
    )
});

/// The non-negative distance-from-goal metric used only by the renderer
/// overlay (§4.8) to colour-code agents; never consulted by kernel control
/// flow. Distance to the nearest of the four screen corners, normalised by
/// the screen diagonal so it lands in roughly `[0, 1]`.
pub fn error_function(agent: &Agent, cfg: &Config) -> f64 {
    let p = agent.position();
    let corners = [
        (0.0, 0.0),
        (cfg.screen_width, 0.0),
        (0.0, cfg.screen_height),
        (cfg.screen_width, cfg.screen_height),
    ];
    let diagonal = (cfg.screen_width * cfg.screen_width + cfg.screen_height * cfg.screen_height).sqrt();
    corners
        .iter()
        .map(|(cx, cy)| (((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()) / diagonal)
        .fold(f64::INFINITY, f64::min)
}

// A tiny lazily-initialised static, matching the "no runtime cost if
// unused" shape of `once_cell::sync::Lazy` without adding that
// dependency — the standard library's own primitive is sufficient here
// since `DEFAULT_SURVIVAL` has no teardown requirements.
pub struct Lazy<T> {
    init: fn() -> T,
    cell: std::sync::OnceLock<T>,
}

impl<T> Lazy<T> {
    pub const fn new(init: fn() -> T) -> Self {
        Lazy {
            init,
            cell: std::sync::OnceLock::new(),
        }
    }
}

impl<T> std::ops::Deref for Lazy<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.cell.get_or_init(self.init)
    }
}
