//! Keyframes
//!
//! A [`Keyframe`] is one endpoint of an interpolation: a set of animated properties
//! with their values. Keyframes are immutable values; the builder methods consume
//! `self` and return a new keyframe.

use parallax_core::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Animatable visual properties
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// Horizontal offset in pixels
    X,
    /// Vertical offset in pixels
    Y,
    /// Rotation in degrees
    Rotate,
    /// Uniform scale factor
    Scale,
    /// Opacity (0.0 to 1.0)
    Opacity,
    /// Blur radius in pixels
    Blur,
}

impl Property {
    pub const COUNT: usize = 6;

    pub const ALL: [Property; Property::COUNT] = [
        Property::X,
        Property::Y,
        Property::Rotate,
        Property::Scale,
        Property::Opacity,
        Property::Blur,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Value of the property on an element that has never been animated
    pub const fn rest_value(self) -> f32 {
        match self {
            Property::Scale | Property::Opacity => 1.0,
            _ => 0.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Property::X => "x",
            Property::Y => "y",
            Property::Rotate => "rotate",
            Property::Scale => "scale",
            Property::Opacity => "opacity",
            Property::Blur => "blur",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "translate_x" => Ok(Property::X),
            "y" | "translate_y" => Ok(Property::Y),
            "rotate" | "rotation" => Ok(Property::Rotate),
            "scale" => Ok(Property::Scale),
            "opacity" => Ok(Property::Opacity),
            "blur" => Ok(Property::Blur),
            other => Err(ConfigError::UnknownProperty(other.to_string())),
        }
    }
}

/// A set of properties, stored as a bitmask
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PropertySet(u8);

impl PropertySet {
    pub const EMPTY: PropertySet = PropertySet(0);

    pub fn insert(&mut self, property: Property) {
        self.0 |= 1 << property.index();
    }

    pub fn contains(&self, property: Property) -> bool {
        self.0 & (1 << property.index()) != 0
    }

    /// Properties in `self` that are not in `other`
    pub fn difference(&self, other: PropertySet) -> PropertySet {
        PropertySet(self.0 & !other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Property> + '_ {
        Property::ALL.into_iter().filter(|p| self.contains(*p))
    }
}

impl fmt::Display for PropertySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, property) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(property.name())?;
        }
        Ok(())
    }
}

impl FromIterator<Property> for PropertySet {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut set = PropertySet::EMPTY;
        for property in iter {
            set.insert(property);
        }
        set
    }
}

/// Property values at one end of an interpolation
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Keyframe {
    values: [Option<f32>; Property::COUNT],
}

impl Keyframe {
    /// An empty keyframe
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keyframe with only opacity set
    pub fn opacity(value: f32) -> Self {
        Self::new().with_opacity(value)
    }

    /// Create a keyframe with translation
    pub fn translate(x: f32, y: f32) -> Self {
        Self::new().with_translate(x, y)
    }

    /// Create a keyframe with uniform scale
    pub fn scale(value: f32) -> Self {
        Self::new().with_scale(value)
    }

    /// Builder: set any property
    pub fn with(mut self, property: Property, value: f32) -> Self {
        self.values[property.index()] = Some(value);
        self
    }

    pub fn with_x(self, px: f32) -> Self {
        self.with(Property::X, px)
    }

    pub fn with_y(self, px: f32) -> Self {
        self.with(Property::Y, px)
    }

    /// Builder: set translation
    pub fn with_translate(self, x: f32, y: f32) -> Self {
        self.with_x(x).with_y(y)
    }

    /// Builder: set rotation in degrees
    pub fn with_rotate(self, degrees: f32) -> Self {
        self.with(Property::Rotate, degrees)
    }

    pub fn with_scale(self, value: f32) -> Self {
        self.with(Property::Scale, value)
    }

    pub fn with_opacity(self, value: f32) -> Self {
        self.with(Property::Opacity, value)
    }

    /// Builder: set blur radius in pixels
    pub fn with_blur(self, px: f32) -> Self {
        self.with(Property::Blur, px)
    }

    pub fn get(&self, property: Property) -> Option<f32> {
        self.values[property.index()]
    }

    /// The properties this keyframe sets
    pub fn properties(&self) -> PropertySet {
        self.iter().map(|(p, _)| p).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Iterate over the set properties in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Property, f32)> + '_ {
        Property::ALL
            .into_iter()
            .filter_map(|p| self.values[p.index()].map(|v| (p, v)))
    }

    /// Interpolate towards `other` by `t`.
    ///
    /// Properties set on only one side keep that side's value.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let mut values = [None; Property::COUNT];
        for (i, slot) in values.iter_mut().enumerate() {
            *slot = lerp_opt(self.values[i], other.values[i], t);
        }
        Self { values }
    }
}

/// Helper to interpolate optional values
fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}
