//! Easing curves for timelines, scroll smoothing and scrubbed triggers.
//!
//! Easing functions are first-class values: timelines take an [`Easing`] by
//! value rather than looking a name up at animation-run time. A small catalog
//! of named presets ([`Easing::from_name`]) exists only so that configuration
//! files can reference curves by their conventional preset names
//! (`"expo.out"`, `"power3.out"`, `"elastic.out(1, 0.5)"`, ...); those names
//! are resolved once, at configuration-load time.

use std::sync::Arc;

/// An easing curve mapping normalized progress to eased progress.
#[derive(Clone)]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Quadratic acceleration.
    EaseIn,
    /// Quadratic deceleration.
    EaseOut,
    /// Slow start and end, fast middle.
    EaseInOut,
    /// Polynomial acceleration of the given degree (`power2.in`..).
    PowerIn(u8),
    /// Polynomial deceleration of the given degree.
    PowerOut(u8),
    /// Polynomial ease on both ends.
    PowerInOut(u8),
    /// Exponential acceleration.
    ExpoIn,
    /// Exponential deceleration; the default scroll smoothing curve.
    ExpoOut,
    /// Exponential ease on both ends; used for whip-style exits.
    ExpoInOut,
    /// Sinusoidal ease on both ends; used for floating loops.
    SineInOut,
    /// Decaying oscillation past the target (can overshoot).
    ElasticOut { amplitude: f32, period: f32 },
    /// Overshoots the target once, then settles.
    BackOut { overshoot: f32 },
    /// CSS-style cubic-bezier curve (x1, y1, x2, y2).
    CubicBezier(f32, f32, f32, f32),
    /// User-defined function.
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl Easing {
    /// Evaluate the curve at time t (0.0 to 1.0).
    /// The result can exceed `[0, 1]` for overshooting curves.
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => ease_in_out(t),
            Easing::PowerIn(n) => t.powi(*n as i32),
            Easing::PowerOut(n) => 1.0 - (1.0 - t).powi(*n as i32),
            Easing::PowerInOut(n) => power_in_out(t, *n),
            Easing::ExpoIn => expo_in(t),
            Easing::ExpoOut => expo_out(t),
            Easing::ExpoInOut => expo_in_out(t),
            Easing::SineInOut => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
            Easing::ElasticOut { amplitude, period } => elastic_out(t, *amplitude, *period),
            Easing::BackOut { overshoot } => back_out(t, *overshoot),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
            Easing::Custom(f) => f(t),
        }
    }

    /// Create a custom easing from a closure.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        Easing::Custom(Arc::new(f))
    }

    /// Resolve a named preset.
    ///
    /// Recognized names:
    /// `"none"`/`"linear"`, `"power1.out"` through `"power4.inOut"`,
    /// `"expo.in"`/`"expo.out"`, `"sine.inOut"`, `"elastic.out(a, p)"`,
    /// `"back.out(o)"`. Returns `None` for anything else.
    pub fn from_name(name: &str) -> Option<Easing> {
        let name = name.trim();
        match name {
            "none" | "linear" => return Some(Easing::Linear),
            "expo.in" => return Some(Easing::ExpoIn),
            "expo.out" => return Some(Easing::ExpoOut),
            "expo.inOut" => return Some(Easing::ExpoInOut),
            "sine.inOut" => return Some(Easing::SineInOut),
            "elastic.out" => {
                return Some(Easing::ElasticOut {
                    amplitude: 1.0,
                    period: 0.3,
                })
            }
            "back.out" => return Some(Easing::BackOut { overshoot: 1.70158 }),
            _ => {}
        }

        if let Some(rest) = name.strip_prefix("power") {
            let (degree, suffix) = rest.split_once('.')?;
            let degree: u8 = degree.parse().ok()?;
            if degree == 0 || degree > 4 {
                return None;
            }
            return match suffix {
                "in" => Some(Easing::PowerIn(degree + 1)),
                "out" => Some(Easing::PowerOut(degree + 1)),
                "inOut" => Some(Easing::PowerInOut(degree + 1)),
                _ => None,
            };
        }

        if let Some(args) = parse_call(name, "elastic.out") {
            let (amplitude, period) = match args.as_slice() {
                [a] => (*a, 0.3),
                [a, p] => (*a, *p),
                _ => return None,
            };
            return Some(Easing::ElasticOut { amplitude, period });
        }

        if let Some(args) = parse_call(name, "back.out") {
            let overshoot = match args.as_slice() {
                [o] => *o,
                _ => return None,
            };
            return Some(Easing::BackOut { overshoot });
        }

        None
    }
}

impl std::fmt::Debug for Easing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Easing::Linear => write!(f, "Linear"),
            Easing::EaseIn => write!(f, "EaseIn"),
            Easing::EaseOut => write!(f, "EaseOut"),
            Easing::EaseInOut => write!(f, "EaseInOut"),
            Easing::PowerIn(n) => write!(f, "PowerIn({n})"),
            Easing::PowerOut(n) => write!(f, "PowerOut({n})"),
            Easing::PowerInOut(n) => write!(f, "PowerInOut({n})"),
            Easing::ExpoIn => write!(f, "ExpoIn"),
            Easing::ExpoOut => write!(f, "ExpoOut"),
            Easing::ExpoInOut => write!(f, "ExpoInOut"),
            Easing::SineInOut => write!(f, "SineInOut"),
            Easing::ElasticOut { amplitude, period } => {
                write!(f, "ElasticOut({amplitude}, {period})")
            }
            Easing::BackOut { overshoot } => write!(f, "BackOut({overshoot})"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "CubicBezier({x1}, {y1}, {x2}, {y2})")
            }
            Easing::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Parse `prefix(a, b, ...)` into its numeric arguments.
fn parse_call(name: &str, prefix: &str) -> Option<Vec<f32>> {
    let rest = name.strip_prefix(prefix)?;
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
    inner
        .split(',')
        .map(|arg| arg.trim().parse::<f32>().ok())
        .collect()
}

// Easing functions

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

fn power_in_out(t: f32, n: u8) -> f32 {
    if t < 0.5 {
        0.5 * (2.0 * t).powi(n as i32)
    } else {
        1.0 - 0.5 * (2.0 - 2.0 * t).powi(n as i32)
    }
}

fn expo_in(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else {
        2.0f32.powf(10.0 * (t - 1.0))
    }
}

fn expo_out(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0f32.powf(-10.0 * t)
    }
}

fn expo_in_out(t: f32) -> f32 {
    if t < 0.5 {
        expo_in(t * 2.0) / 2.0
    } else {
        0.5 + expo_out(t * 2.0 - 1.0) / 2.0
    }
}

fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let amplitude = amplitude.max(1.0);
    let s = period / (2.0 * std::f32::consts::PI) * (1.0 / amplitude).asin();
    amplitude
        * 2.0f32.powf(-10.0 * t)
        * ((t - s) * (2.0 * std::f32::consts::PI) / period).sin()
        + 1.0
}

fn back_out(t: f32, overshoot: f32) -> f32 {
    let t = t - 1.0;
    t * t * ((overshoot + 1.0) * t + overshoot) + 1.0
}

/// Cubic bezier curve evaluation assuming x1, x2 are in [0, 1].
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Newton-Raphson to solve for the parameter given x
    let mut current_t = t;
    for _ in 0..8 {
        let current_x = bezier_axis(current_t, x1, x2);
        let current_slope = bezier_slope(current_t, x1, x2);
        if current_slope.abs() < 1e-6 {
            break;
        }
        current_t -= (current_x - t) / current_slope;
    }
    bezier_axis(current_t, y1, y2)
}

fn bezier_axis(t: f32, p1: f32, p2: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    3.0 * mt2 * t * p1 + 3.0 * mt * t2 * p2 + t3
}

fn bezier_slope(t: f32, p1: f32, p2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(Easing::Linear.evaluate(0.0), 0.0);
        assert_eq!(Easing::Linear.evaluate(0.5), 0.5);
        assert_eq!(Easing::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_ease_in_slower_at_start() {
        assert!(Easing::EaseIn.evaluate(0.5) < 0.5);
    }

    #[test]
    fn test_ease_out_faster_at_start() {
        assert!(Easing::EaseOut.evaluate(0.5) > 0.5);
    }

    #[test]
    fn test_endpoints() {
        let curves = [
            Easing::PowerOut(4),
            Easing::PowerInOut(3),
            Easing::ExpoOut,
            Easing::SineInOut,
            Easing::BackOut { overshoot: 1.70158 },
            Easing::ElasticOut {
                amplitude: 1.0,
                period: 0.5,
            },
        ];
        for curve in curves {
            assert!(curve.evaluate(0.0).abs() < 1e-3, "{curve:?} at 0");
            assert!((curve.evaluate(1.0) - 1.0).abs() < 1e-3, "{curve:?} at 1");
        }
    }

    #[test]
    fn test_back_out_overshoots() {
        let e = Easing::BackOut { overshoot: 1.70158 };
        // Somewhere mid-curve the value exceeds 1.0.
        let max = (1..100)
            .map(|i| e.evaluate(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(max > 1.0);
    }

    #[test]
    fn test_from_name_presets() {
        assert!(matches!(Easing::from_name("none"), Some(Easing::Linear)));
        assert!(matches!(
            Easing::from_name("expo.out"),
            Some(Easing::ExpoOut)
        ));
        assert!(matches!(
            Easing::from_name("power2.inOut"),
            Some(Easing::PowerInOut(3))
        ));
        assert!(matches!(
            Easing::from_name("power4.out"),
            Some(Easing::PowerOut(5))
        ));
        assert!(matches!(
            Easing::from_name("back.out(1.7)"),
            Some(Easing::BackOut { .. })
        ));
        match Easing::from_name("elastic.out(1, 0.5)") {
            Some(Easing::ElasticOut { amplitude, period }) => {
                assert_eq!(amplitude, 1.0);
                assert_eq!(period, 0.5);
            }
            other => panic!("unexpected parse: {other:?}"),
        }
        assert!(Easing::from_name("bounce.magic").is_none());
        assert!(Easing::from_name("power9.out").is_none());
    }

    #[test]
    fn test_custom() {
        let e = Easing::custom(|t| t * t * t);
        assert_eq!(e.evaluate(2.0), 8.0);
    }
}
