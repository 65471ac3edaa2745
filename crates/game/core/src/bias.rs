//! Faction alignment vectors.
//!
//! Every entity in the tower (the tower itself, each floor, each actor and
//! each piece of equipment) carries a [`Bias`]: one signed magnitude per
//! faction. Alignment is additive, so the bias an actor "feels" is the sum of
//! the vectors around it, and the magnitude of that sum is what the decision
//! policy tries to maximize.
//!
//! The dimension is a const parameter, so vectors of different lengths can
//! never be mixed.

/// Number of tower factions, and therefore the dimension of [`FactionBias`].
pub const FACTION_COUNT: usize = Faction::ALL.len();

/// Alignment vector over the tower factions.
pub type FactionBias = Bias<FACTION_COUNT>;

/// Fixed-length vector of signed per-faction magnitudes.
///
/// `Bias` is an immutable value type: every operation returns a new vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bias<const N: usize>([f64; N]);

impl<const N: usize> Bias<N> {
    /// The all-zero vector.
    pub const fn zero() -> Self {
        Self([0.0; N])
    }

    pub const fn from_array(values: [f64; N]) -> Self {
        Self(values)
    }

    pub const fn to_array(self) -> [f64; N] {
        self.0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Magnitude on a single axis.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Pointwise sum.
    pub fn add(&self, other: &Self) -> Self {
        let mut out = self.0;
        for (slot, rhs) in out.iter_mut().zip(other.0.iter()) {
            *slot += rhs;
        }
        Self(out)
    }

    /// Multiplies every component by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        Self(self.0.map(|v| v * factor))
    }

    /// Sum of absolute magnitudes (L1 norm).
    pub fn abs_sum(&self) -> f64 {
        self.0.iter().map(|v| v.abs()).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }

    /// Rescales the vector so that its [`abs_sum`](Self::abs_sum) equals `target`.
    ///
    /// The sign pattern is preserved. A zero vector stays zero whatever the target.
    pub fn make_abs_sum_to(&self, target: f64) -> Self {
        let sum = self.abs_sum();
        if sum == 0.0 {
            return Self::zero();
        }
        self.scale(target / sum)
    }

    /// Index of the largest signed component.
    ///
    /// Ties resolve to the lowest index. Returns 0 for a zero-length vector.
    pub fn near_faction_index(&self) -> usize {
        let mut best = 0;
        for (index, value) in self.0.iter().enumerate().skip(1) {
            if *value > self.0[best] {
                best = index;
            }
        }
        best
    }
}

impl<const N: usize> Default for Bias<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> From<[f64; N]> for Bias<N> {
    fn from(values: [f64; N]) -> Self {
        Self(values)
    }
}

impl FactionBias {
    /// The faction this vector leans towards the most.
    pub fn near_faction(&self) -> Faction {
        Faction::from_repr(self.near_faction_index()).unwrap_or_default()
    }
}

#[cfg(feature = "serde")]
impl<const N: usize> serde::Serialize for Bias<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, const N: usize> serde::Deserialize<'de> for Bias<N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = Vec::<f64>::deserialize(deserializer)?;
        let len = values.len();
        let array: [f64; N] = values.try_into().map_err(|_| {
            serde::de::Error::invalid_length(len, &"one magnitude per faction")
        })?;
        Ok(Self(array))
    }
}

/// Tower factions.
///
/// The discriminant doubles as the axis index inside a [`FactionBias`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(usize)]
pub enum Faction {
    #[default]
    Crimson,
    Amber,
    Verdant,
    Azure,
    Violet,
    Obsidian,
}

impl Faction {
    pub const ALL: [Faction; 6] = [
        Faction::Crimson,
        Faction::Amber,
        Faction::Verdant,
        Faction::Azure,
        Faction::Violet,
        Faction::Obsidian,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Unit vector on this faction's own axis.
    pub fn base_bias(self) -> FactionBias {
        let mut values = [0.0; FACTION_COUNT];
        values[self.index()] = 1.0;
        Bias(values)
    }
}
