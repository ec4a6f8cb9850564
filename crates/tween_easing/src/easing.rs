//! Easing functions for tweens
//!
//! Equations follow Robert Penner's easing set. Outputs are not clamped:
//! `Back` and `Elastic` overshoot `[0, 1]` on purpose.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Default overshoot used by the `Back` family
pub const DEFAULT_OVERSHOOT: f64 = 1.70158;

/// Direction of a parameterized easing family
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EaseMode {
    In,
    Out,
    #[default]
    InOut,
}

impl EaseMode {
    fn suffix(self) -> &'static str {
        match self {
            EaseMode::In => "IN",
            EaseMode::Out => "OUT",
            EaseMode::InOut => "INOUT",
        }
    }
}

/// Easing function type
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
    /// Pulls back before moving, by `overshoot`
    Back { mode: EaseMode, overshoot: f64 },
    /// Damped oscillation. Unset parameters fall back to the classic defaults.
    Elastic {
        mode: EaseMode,
        amplitude: Option<f64>,
        period: Option<f64>,
    },
    CubicBezier(f64, f64, f64, f64),
    /// User supplied equation
    Custom(fn(f64) -> f64),
}

impl Easing {
    /// `Back` easing with the default overshoot
    pub fn back(mode: EaseMode) -> Self {
        Easing::Back {
            mode,
            overshoot: DEFAULT_OVERSHOOT,
        }
    }

    /// `Elastic` easing with default amplitude and period
    pub fn elastic(mode: EaseMode) -> Self {
        Easing::Elastic {
            mode,
            amplitude: None,
            period: None,
        }
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        match *self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => -t * (t - 2.0),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuart => t.powi(4),
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::EaseInQuint => t.powi(5),
            Easing::EaseOutQuint => 1.0 - (1.0 - t).powi(5),
            Easing::EaseInOutQuint => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }
            Easing::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            Easing::EaseOutSine => (t * PI / 2.0).sin(),
            Easing::EaseInOutSine => -0.5 * ((PI * t).cos() - 1.0),
            Easing::EaseInCirc => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Easing::EaseOutCirc => (1.0 - (t - 1.0).powi(2)).max(0.0).sqrt(),
            Easing::EaseInOutCirc => {
                let t = t * 2.0;
                if t < 1.0 {
                    -0.5 * ((1.0 - t * t).max(0.0).sqrt() - 1.0)
                } else {
                    let t = t - 2.0;
                    0.5 * ((1.0 - t * t).max(0.0).sqrt() + 1.0)
                }
            }
            Easing::EaseInExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * (t - 1.0))
                }
            }
            Easing::EaseOutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Easing::EaseInOutExpo => {
                if t == 0.0 {
                    return 0.0;
                }
                if t == 1.0 {
                    return 1.0;
                }
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * 2f64.powf(10.0 * (t - 1.0))
                } else {
                    0.5 * (2.0 - 2f64.powf(-10.0 * (t - 1.0)))
                }
            }
            Easing::EaseInBounce => 1.0 - bounce_out(1.0 - t),
            Easing::EaseOutBounce => bounce_out(t),
            Easing::EaseInOutBounce => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - t * 2.0)) * 0.5
                } else {
                    bounce_out(t * 2.0 - 1.0) * 0.5 + 0.5
                }
            }
            Easing::Back { mode, overshoot } => back(mode, overshoot, t),
            Easing::Elastic {
                mode,
                amplitude,
                period,
            } => elastic(mode, amplitude, period, t),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, x1, y1, x2, y2),
            Easing::Custom(f) => f(t),
        }
    }

    /// Every named equation, in declaration order
    pub fn named() -> [Easing; 31] {
        [
            Easing::Linear,
            Easing::EaseInQuad,
            Easing::EaseOutQuad,
            Easing::EaseInOutQuad,
            Easing::EaseInCubic,
            Easing::EaseOutCubic,
            Easing::EaseInOutCubic,
            Easing::EaseInQuart,
            Easing::EaseOutQuart,
            Easing::EaseInOutQuart,
            Easing::EaseInQuint,
            Easing::EaseOutQuint,
            Easing::EaseInOutQuint,
            Easing::EaseInSine,
            Easing::EaseOutSine,
            Easing::EaseInOutSine,
            Easing::EaseInCirc,
            Easing::EaseOutCirc,
            Easing::EaseInOutCirc,
            Easing::EaseInExpo,
            Easing::EaseOutExpo,
            Easing::EaseInOutExpo,
            Easing::EaseInBounce,
            Easing::EaseOutBounce,
            Easing::EaseInOutBounce,
            Easing::back(EaseMode::In),
            Easing::back(EaseMode::Out),
            Easing::back(EaseMode::InOut),
            Easing::elastic(EaseMode::In),
            Easing::elastic(EaseMode::Out),
            Easing::elastic(EaseMode::InOut),
        ]
    }

    /// `Family.MODE` name for built-in equations, `None` for bezier and custom curves
    pub fn name(&self) -> Option<String> {
        let (family, mode) = match *self {
            Easing::Linear => ("Linear", EaseMode::InOut),
            Easing::EaseInQuad => ("Quad", EaseMode::In),
            Easing::EaseOutQuad => ("Quad", EaseMode::Out),
            Easing::EaseInOutQuad => ("Quad", EaseMode::InOut),
            Easing::EaseInCubic => ("Cubic", EaseMode::In),
            Easing::EaseOutCubic => ("Cubic", EaseMode::Out),
            Easing::EaseInOutCubic => ("Cubic", EaseMode::InOut),
            Easing::EaseInQuart => ("Quart", EaseMode::In),
            Easing::EaseOutQuart => ("Quart", EaseMode::Out),
            Easing::EaseInOutQuart => ("Quart", EaseMode::InOut),
            Easing::EaseInQuint => ("Quint", EaseMode::In),
            Easing::EaseOutQuint => ("Quint", EaseMode::Out),
            Easing::EaseInOutQuint => ("Quint", EaseMode::InOut),
            Easing::EaseInSine => ("Sine", EaseMode::In),
            Easing::EaseOutSine => ("Sine", EaseMode::Out),
            Easing::EaseInOutSine => ("Sine", EaseMode::InOut),
            Easing::EaseInCirc => ("Circ", EaseMode::In),
            Easing::EaseOutCirc => ("Circ", EaseMode::Out),
            Easing::EaseInOutCirc => ("Circ", EaseMode::InOut),
            Easing::EaseInExpo => ("Expo", EaseMode::In),
            Easing::EaseOutExpo => ("Expo", EaseMode::Out),
            Easing::EaseInOutExpo => ("Expo", EaseMode::InOut),
            Easing::EaseInBounce => ("Bounce", EaseMode::In),
            Easing::EaseOutBounce => ("Bounce", EaseMode::Out),
            Easing::EaseInOutBounce => ("Bounce", EaseMode::InOut),
            Easing::Back { mode, .. } => ("Back", mode),
            Easing::Elastic { mode, .. } => ("Elastic", mode),
            Easing::CubicBezier(..) | Easing::Custom(_) => return None,
        };
        Some(format!("{}.{}", family, mode.suffix()))
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), self) {
            (Some(name), _) => f.write_str(&name),
            (None, Easing::CubicBezier(x1, y1, x2, y2)) => {
                write!(f, "CubicBezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
            (None, _) => f.write_str("Custom"),
        }
    }
}

/// Error returned when an easing name is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown easing equation: {0}")]
pub struct ParseEasingError(pub String);

impl FromStr for Easing {
    type Err = ParseEasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ParseEasingError(s.to_string());
        let (family, suffix) = s.trim().split_once('.').ok_or_else(unknown)?;
        let mode = match suffix {
            "IN" => EaseMode::In,
            "OUT" => EaseMode::Out,
            "INOUT" => EaseMode::InOut,
            _ => return Err(unknown()),
        };

        let pick = |a: Easing, b: Easing, c: Easing| match mode {
            EaseMode::In => a,
            EaseMode::Out => b,
            EaseMode::InOut => c,
        };

        let easing = match family {
            "Linear" if mode == EaseMode::InOut => Easing::Linear,
            "Quad" => pick(
                Easing::EaseInQuad,
                Easing::EaseOutQuad,
                Easing::EaseInOutQuad,
            ),
            "Cubic" => pick(
                Easing::EaseInCubic,
                Easing::EaseOutCubic,
                Easing::EaseInOutCubic,
            ),
            "Quart" => pick(
                Easing::EaseInQuart,
                Easing::EaseOutQuart,
                Easing::EaseInOutQuart,
            ),
            "Quint" => pick(
                Easing::EaseInQuint,
                Easing::EaseOutQuint,
                Easing::EaseInOutQuint,
            ),
            "Sine" => pick(
                Easing::EaseInSine,
                Easing::EaseOutSine,
                Easing::EaseInOutSine,
            ),
            "Circ" => pick(
                Easing::EaseInCirc,
                Easing::EaseOutCirc,
                Easing::EaseInOutCirc,
            ),
            "Expo" => pick(
                Easing::EaseInExpo,
                Easing::EaseOutExpo,
                Easing::EaseInOutExpo,
            ),
            "Bounce" => pick(
                Easing::EaseInBounce,
                Easing::EaseOutBounce,
                Easing::EaseInOutBounce,
            ),
            "Back" => Easing::back(mode),
            "Elastic" => Easing::elastic(mode),
            _ => return Err(unknown()),
        };
        Ok(easing)
    }
}

fn bounce_out(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

fn back(mode: EaseMode, s: f64, t: f64) -> f64 {
    match mode {
        EaseMode::In => t * t * ((s + 1.0) * t - s),
        EaseMode::Out => {
            let t = t - 1.0;
            t * t * ((s + 1.0) * t + s) + 1.0
        }
        EaseMode::InOut => {
            let s = s * 1.525;
            let t = t * 2.0;
            if t < 1.0 {
                0.5 * (t * t * ((s + 1.0) * t - s))
            } else {
                let t = t - 2.0;
                0.5 * (t * t * ((s + 1.0) * t + s) + 2.0)
            }
        }
    }
}

fn elastic(mode: EaseMode, amplitude: Option<f64>, period: Option<f64>, t: f64) -> f64 {
    if t == 0.0 {
        return 0.0;
    }
    if t == 1.0 {
        return 1.0;
    }

    let p = period.unwrap_or(match mode {
        EaseMode::InOut => 0.3 * 1.5,
        _ => 0.3,
    });
    let (a, s) = match amplitude {
        Some(a) if a >= 1.0 => (a, p / (2.0 * PI) * (1.0 / a).asin()),
        _ => (1.0, p / 4.0),
    };
    let wave = |t: f64| ((t - s) * (2.0 * PI) / p).sin();

    match mode {
        EaseMode::In => {
            let t = t - 1.0;
            -(a * 2f64.powf(10.0 * t) * wave(t))
        }
        EaseMode::Out => a * 2f64.powf(-10.0 * t) * wave(t) + 1.0,
        EaseMode::InOut => {
            let t = t * 2.0 - 1.0;
            if t < 0.0 {
                -0.5 * (a * 2f64.powf(10.0 * t) * wave(t))
            } else {
                a * 2f64.powf(-10.0 * t) * wave(t) * 0.5 + 1.0
            }
        }
    }
}

/// Cubic bezier easing calculation (matches CSS `cubic-bezier()` as browsers implement it).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
fn cubic_bezier_ease(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t;
    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2);
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2)
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}
