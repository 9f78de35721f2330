//! Parameter introspection for the analysis client.
//!
//! The [`ParameterInfo`] trait and [`ParamDescriptor`] let a GUI discover the
//! client's parameters at runtime: their ranges, defaults, units and whether
//! they are stepped. Panels build sliders from these descriptors instead of
//! hard-coding ranges.
//!
//! # Example
//!
//! ```rust
//! use noveltyslice_analysis::{NoveltySliceParams, ParameterInfo};
//!
//! let params = NoveltySliceParams::default();
//! for i in 0..params.param_count() {
//!     let desc = params.param_info(i).unwrap();
//!     println!("{}: {} ({}..={})", desc.name, params.get_param(i), desc.min, desc.max);
//! }
//! ```

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter; saved
/// configurations refer to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Parameter has discrete steps (enum-like, integer values).
    pub const STEPPED: Self = Self(1 << 0);
    /// Parameter only accepts odd integer values.
    pub const ODD_ONLY: Self = Self(1 << 1);
    /// Parameter should be hidden from generic UI.
    pub const HIDDEN: Self = Self(1 << 2);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::NONE
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Count of analysis frames (hops).
    Frames,
    /// Count of samples.
    Samples,
    /// No unit - for dimensionless parameters.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Frames => " frames",
            ParamUnit::Samples => " smp",
            ParamUnit::None => "",
        }
    }
}

/// Metadata describing one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Kernel Size").
    pub name: &'static str,
    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,
    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Default value.
    pub default: f32,
    /// Recommended step increment.
    pub step: f32,
    /// Stable numeric ID.
    pub id: ParamId,
    /// Human-readable stable ID, matching the config key.
    pub string_id: &'static str,
    /// Capability flags.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Continuous parameter with no unit.
    pub const fn continuous(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::NONE,
        }
    }

    /// Integer parameter with a unit.
    pub const fn integer(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::STEPPED,
        }
    }

    /// Set the stable IDs.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Add flags to the descriptor.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    /// Clamp a value into range, rounding stepped parameters and snapping
    /// odd-only parameters to the nearest odd value inside the range.
    pub fn clamp(&self, value: f32) -> f32 {
        let value = if value.is_nan() { self.default } else { value };
        let mut v = value.clamp(self.min, self.max);
        if self.flags.contains(ParamFlags::STEPPED) {
            v = v.round();
        }
        if self.flags.contains(ParamFlags::ODD_ONLY) && (v as i64) % 2 == 0 {
            // Step up unless that leaves the range.
            v = if v + 1.0 <= self.max { v + 1.0 } else { v - 1.0 };
        }
        v
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (value - self.min) / range
    }

    /// Format a value with the descriptor's unit.
    pub fn format_value(&self, value: f32) -> String {
        if self.flags.contains(ParamFlags::STEPPED) {
            format!("{:.0}{}", value, self.unit.suffix())
        } else {
            format!("{:.2}{}", value, self.unit.suffix())
        }
    }
}

/// Trait for objects that expose introspectable parameters.
///
/// Parameters are accessed by zero-based index, stable for the lifetime of
/// the object.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, `None` when out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index` (`0.0` when out of range).
    fn get_param(&self, index: usize) -> f32;

    /// Set the parameter at `index`. Values are clamped by the descriptor.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by its stable string ID.
    fn find_param(&self, string_id: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i)
                .is_some_and(|desc| desc.string_id == string_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn odd() -> ParamDescriptor {
        ParamDescriptor::integer("Kernel Size", "Kernel", ParamUnit::Frames, 3.0, 101.0, 3.0)
            .with_flags(ParamFlags::ODD_ONLY)
    }

    #[test]
    fn clamp_snaps_odd_values() {
        let desc = odd();
        assert_eq!(desc.clamp(4.0), 5.0);
        assert_eq!(desc.clamp(3.4), 3.0);
        assert_eq!(desc.clamp(0.0), 3.0);
        assert_eq!(desc.clamp(500.0), 101.0);
    }

    #[test]
    fn clamp_odd_at_even_max_steps_down() {
        let desc = ParamDescriptor::integer("Filter", "Filter", ParamUnit::Frames, 1.0, 10.0, 1.0)
            .with_flags(ParamFlags::ODD_ONLY);
        assert_eq!(desc.clamp(10.0), 9.0);
    }

    #[test]
    fn clamp_nan_uses_default() {
        let desc = ParamDescriptor::continuous("Threshold", "Thresh", 0.0, 1.0, 0.5);
        assert_eq!(desc.clamp(f32::NAN), 0.5);
    }

    #[test]
    fn format_uses_unit_suffix() {
        assert_eq!(odd().format_value(7.0), "7 frames");
        let desc = ParamDescriptor::continuous("Threshold", "Thresh", 0.0, 1.0, 0.5);
        assert_eq!(desc.format_value(0.25), "0.25");
    }

    #[test]
    fn flags_union_contains() {
        let flags = ParamFlags::STEPPED.union(ParamFlags::ODD_ONLY);
        assert!(flags.contains(ParamFlags::STEPPED));
        assert!(flags.contains(ParamFlags::ODD_ONLY));
        assert!(!flags.contains(ParamFlags::HIDDEN));
    }
}
