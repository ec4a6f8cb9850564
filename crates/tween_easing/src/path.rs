//! Path functions for tweens with waypoints
//!
//! A path maps overall progress `t` onto the ordered points
//! `[start, waypoints.., target]` of a single attribute.

/// Interpolation through a list of points
#[derive(Clone, Copy, Debug, Default)]
pub enum TweenPath {
    /// Straight segments between consecutive points
    Linear,
    /// Smooth Catmull-Rom spline, end points duplicated
    #[default]
    CatmullRom,
    /// User supplied path
    Custom(fn(f64, &[f64]) -> f64),
}

impl TweenPath {
    /// Compute the value at progress `t` over `points`
    pub fn compute(&self, t: f64, points: &[f64]) -> f64 {
        match points.len() {
            0 => return 0.0,
            1 => return points[0],
            _ => {}
        }

        match self {
            TweenPath::Linear => {
                let (segment, t) = locate(t, points.len());
                points[segment] + t * (points[segment + 1] - points[segment])
            }
            TweenPath::CatmullRom => {
                let n = points.len();
                let (segment, t) = locate(t, n);
                let a = points[segment.saturating_sub(1)];
                let b = points[segment];
                let c = points[segment + 1];
                let d = points[(segment + 2).min(n - 1)];
                catmull_rom_spline(a, b, c, d, t)
            }
            TweenPath::Custom(f) => f(t, points),
        }
    }
}

/// Segment index and local progress inside that segment
fn locate(t: f64, n: usize) -> (usize, f64) {
    let last = (n - 2) as f64;
    let segment = ((n - 1) as f64 * t).floor().clamp(0.0, last);
    (segment as usize, t * (n - 1) as f64 - segment)
}

fn catmull_rom_spline(a: f64, b: f64, c: f64, d: f64, t: f64) -> f64 {
    let t1 = (c - a) * 0.5;
    let t2 = (d - b) * 0.5;
    let t_2 = t * t;
    let t_3 = t_2 * t;
    let h1 = 2.0 * t_3 - 3.0 * t_2 + 1.0;
    let h2 = -2.0 * t_3 + 3.0 * t_2;
    let h3 = t_3 - 2.0 * t_2 + t;
    let h4 = t_3 - t_2;
    b * h1 + c * h2 + t1 * h3 + t2 * h4
}
