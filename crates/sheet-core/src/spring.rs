//! One-dimensional spring driver that owns the sheet offset.
//!
//! Every write to the offset goes through [`SpringDriver`]: animated
//! transitions ([`SpringDriver::drive_to`]), synchronous jumps
//! ([`SpringDriver::jump_to`]) and proportional rescales
//! ([`SpringDriver::rescale`]). A new transition always replaces the one in
//! flight, so the last request wins.
//!
//! Physics use a damped harmonic oscillator with tension/friction/mass
//! parameters, integrated with a fixed semi-implicit Euler step.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::spring::{MAX_FRAME_SECONDS, REST_DISTANCE, REST_SPEED, STEP_SECONDS};
use crate::error::SheetError;

// ============================================================================
// SpringConfig
// ============================================================================

/// Physical parameters of one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Spring constant. Higher values pull harder toward the target.
    pub tension: f64,
    /// Damping coefficient. Lower values overshoot more.
    pub friction: f64,
    /// Mass of the animated value.
    pub mass: f64,
    /// Initial speed toward the target in px/ms. Zero keeps the current
    /// velocity of an interrupted animation.
    pub velocity: f64,
}

impl SpringConfig {
    /// Fast, barely overshooting. Used for snapping and closing.
    pub const STIFF: Self = Self::new(210.0, 20.0);
    /// Soft and bouncy. Used to recover from a canceled gesture.
    pub const WOBBLY: Self = Self::new(180.0, 12.0);
    /// Heavier damping for one-shot transitions.
    pub const ONCE: Self = Self::new(246.0, 32.0);

    pub const fn new(tension: f64, friction: f64) -> Self {
        Self {
            tension,
            friction,
            mass: 1.0,
            velocity: 0.0,
        }
    }

    /// Returns a copy launching with `velocity` px/ms toward the target.
    pub fn with_velocity(self, velocity: f64) -> Self {
        Self { velocity, ..self }
    }
}

// ============================================================================
// SpringProfile
// ============================================================================

/// Facts about the release that triggered a transition.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Release {
    /// The gesture was canceled before it ended normally.
    pub canceled: bool,
    /// Release speed in px/ms.
    pub velocity: f64,
}

/// Named selector for the spring used by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SpringProfile {
    /// One-shot transition with heavy damping.
    Once,
    /// Closing: stiff, launched with the release velocity.
    Close,
    /// Snapping to the default threshold.
    Default,
    /// Snapping to the full threshold.
    Full,
}

impl SpringProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Close => "close",
            Self::Default => "default",
            Self::Full => "full",
        }
    }

    /// Resolves the profile into spring parameters for `release`.
    pub fn config(self, release: Release) -> SpringConfig {
        match self {
            Self::Once => SpringConfig::ONCE,
            Self::Close => SpringConfig::STIFF.with_velocity(release.velocity),
            Self::Default | Self::Full if release.canceled => SpringConfig::WOBBLY,
            Self::Default | Self::Full => SpringConfig::STIFF,
        }
    }
}

impl fmt::Display for SpringProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpringProfile {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "once" => Ok(Self::Once),
            "close" => Ok(Self::Close),
            "default" => Ok(Self::Default),
            "full" => Ok(Self::Full),
            other => Err(SheetError::UnknownProfile(other.to_string())),
        }
    }
}

impl TryFrom<String> for SpringProfile {
    type Error = SheetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SpringProfile> for String {
    fn from(profile: SpringProfile) -> Self {
        profile.as_str().to_string()
    }
}

// ============================================================================
// SpringDriver
// ============================================================================

/// How a transition reaches its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Land on the target at the next frame, without intermediate values.
    Immediate,
    /// Spring toward the target.
    Animated(SpringConfig),
}

/// Handle identifying one `drive_to` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

#[derive(Debug, Clone, Copy)]
struct Animation {
    id: AnimationId,
    target: f64,
    motion: Motion,
}

type Observer = Box<dyn FnMut(f64)>;

/// Owner of the animated offset.
pub struct SpringDriver {
    value: f64,
    /// Current speed in px/s.
    velocity: f64,
    animation: Option<Animation>,
    next_id: u64,
    observer: Option<Observer>,
}

impl SpringDriver {
    pub fn new(initial: f64) -> Self {
        Self {
            value: initial,
            velocity: 0.0,
            animation: None,
            next_id: 0,
            observer: None,
        }
    }

    /// Registers the callback invoked after every change of the offset.
    pub fn observe(&mut self, observer: impl FnMut(f64) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current speed in px/s.
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Target of the transition in flight.
    pub fn target(&self) -> Option<f64> {
        self.animation.map(|a| a.target)
    }

    /// Id of the transition in flight.
    pub fn current(&self) -> Option<AnimationId> {
        self.animation.map(|a| a.id)
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Starts a transition toward `target`, replacing any transition in flight.
    ///
    /// The returned id is reported by [`advance`](Self::advance) once the
    /// value rests on the target. A superseded id is never reported.
    pub fn drive_to(&mut self, target: f64, motion: Motion) -> Result<AnimationId, SheetError> {
        ensure_finite(target)?;
        if let Motion::Animated(config) = motion {
            ensure_finite(config.velocity)?;
            if config.velocity != 0.0 {
                let direction = (target - self.value).signum();
                self.velocity = config.velocity.abs() * 1000.0 * direction;
            }
        } else {
            self.velocity = 0.0;
        }

        let id = AnimationId(self.next_id);
        self.next_id += 1;
        if let Some(previous) = self.animation.replace(Animation { id, target, motion }) {
            log::trace!("animation {:?} superseded by {:?}", previous.id, id);
        }
        Ok(id)
    }

    /// Moves the offset to `value` now, cancelling any transition.
    pub fn jump_to(&mut self, value: f64) -> Result<(), SheetError> {
        ensure_finite(value)?;
        self.animation = None;
        self.velocity = 0.0;
        self.set(value);
        Ok(())
    }

    /// Scales the offset (and the target in flight) by `ratio`, never dropping
    /// below `floor`. The transition in flight keeps running.
    pub fn rescale(&mut self, ratio: f64, floor: f64) -> Result<(), SheetError> {
        ensure_finite(ratio)?;
        ensure_finite(floor)?;
        if let Some(animation) = self.animation.as_mut() {
            animation.target = (animation.target * ratio).max(floor);
        }
        self.velocity *= ratio;
        self.set((self.value * ratio).max(floor));
        Ok(())
    }

    /// Advances the transition in flight by `dt` seconds.
    ///
    /// Returns the id of the transition that came to rest during this step.
    pub fn advance(&mut self, dt: f64) -> Option<AnimationId> {
        let animation = self.animation?;
        match animation.motion {
            Motion::Immediate => {
                self.finish(animation);
                Some(animation.id)
            }
            Motion::Animated(config) => {
                if !dt.is_finite() || dt <= 0.0 {
                    return None;
                }
                let mut value = self.value;
                let mut velocity = self.velocity;
                let mut remaining = dt.min(MAX_FRAME_SECONDS);
                while remaining > 0.0 {
                    let step = STEP_SECONDS.min(remaining);
                    let spring = -config.tension * (value - animation.target);
                    let damping = -config.friction * velocity;
                    velocity += (spring + damping) / config.mass * step;
                    value += velocity * step;
                    remaining -= step;
                }

                let at_rest = velocity.abs() < REST_SPEED
                    && (value - animation.target).abs() < REST_DISTANCE;
                if at_rest {
                    self.finish(animation);
                    Some(animation.id)
                } else {
                    self.velocity = velocity;
                    self.set(value);
                    None
                }
            }
        }
    }

    fn finish(&mut self, animation: Animation) {
        self.animation = None;
        self.velocity = 0.0;
        self.set(animation.target);
    }

    fn set(&mut self, value: f64) {
        self.value = value;
        if let Some(observer) = self.observer.as_mut() {
            observer(value);
        }
    }
}

impl Default for SpringDriver {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl fmt::Debug for SpringDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpringDriver")
            .field("value", &self.value)
            .field("velocity", &self.velocity)
            .field("animation", &self.animation)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

fn ensure_finite(value: f64) -> Result<(), SheetError> {
    if value.is_finite() {
        Ok(())
    } else {
        log::warn!("rejected non-finite offset write: {value}");
        Err(SheetError::NonFiniteOffset(value))
    }
}
