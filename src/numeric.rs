//! Element capabilities needed by arithmetic reductions and generators.

/// Values with an identity element and an associative combination.
///
/// `sum` starts from [`Accumulate::identity`] and folds every element in
/// with [`Accumulate::combine`]: `0` and `+` for numbers, the empty string
/// and concatenation for strings.
pub trait Accumulate: Sized {
    fn identity() -> Self;
    fn combine(self, other: Self) -> Self;
}

/// Lossy conversion used by `avg`.
pub trait AsF64 {
    fn as_f64(&self) -> f64;
}

macro_rules! impl_numeric {
    ($($t:ty => $zero:expr),* $(,)?) => {
        $(
            impl Accumulate for $t {
                fn identity() -> Self {
                    $zero
                }

                fn combine(self, other: Self) -> Self {
                    self + other
                }
            }

            impl AsF64 for $t {
                fn as_f64(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_numeric!(
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
    f32 => 0.0, f64 => 0.0,
);

impl Accumulate for String {
    fn identity() -> Self {
        String::new()
    }

    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

/// Scalars that `range` can step through.
///
/// `Step` is the unsigned magnitude of one step; the direction of a range
/// always follows its endpoints.
pub trait RangeValue: Copy + PartialOrd {
    type Step: Copy + PartialOrd;

    /// The step used by `range(start, end)`.
    fn unit_step() -> Self::Step;

    /// False for a zero (or otherwise unusable) step.
    fn is_valid_step(step: Self::Step) -> bool;

    /// Absolute distance between two values.
    fn distance(self, other: Self) -> Self::Step;

    /// `self + step`, or `None` when it leaves the domain.
    fn step_up(self, step: Self::Step) -> Option<Self>;

    /// `self - step`, or `None` when it leaves the domain.
    fn step_down(self, step: Self::Step) -> Option<Self>;
}

macro_rules! impl_range_signed {
    ($($t:ty => $u:ty),* $(,)?) => {
        $(
            impl RangeValue for $t {
                type Step = $u;

                fn unit_step() -> $u {
                    1
                }

                fn is_valid_step(step: $u) -> bool {
                    step != 0
                }

                fn distance(self, other: Self) -> $u {
                    self.abs_diff(other)
                }

                fn step_up(self, step: $u) -> Option<Self> {
                    self.checked_add_unsigned(step)
                }

                fn step_down(self, step: $u) -> Option<Self> {
                    self.checked_sub_unsigned(step)
                }
            }
        )*
    };
}

macro_rules! impl_range_unsigned {
    ($($t:ty),* $(,)?) => {
        $(
            impl RangeValue for $t {
                type Step = $t;

                fn unit_step() -> $t {
                    1
                }

                fn is_valid_step(step: $t) -> bool {
                    step != 0
                }

                fn distance(self, other: Self) -> $t {
                    self.abs_diff(other)
                }

                fn step_up(self, step: $t) -> Option<Self> {
                    self.checked_add(step)
                }

                fn step_down(self, step: $t) -> Option<Self> {
                    self.checked_sub(step)
                }
            }
        )*
    };
}

macro_rules! impl_range_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl RangeValue for $t {
                type Step = $t;

                fn unit_step() -> $t {
                    1.0
                }

                // Negative and non-finite steps would never reach the end.
                fn is_valid_step(step: $t) -> bool {
                    step.is_finite() && step > 0.0
                }

                fn distance(self, other: Self) -> $t {
                    (other - self).abs()
                }

                fn step_up(self, step: $t) -> Option<Self> {
                    Some(self + step)
                }

                fn step_down(self, step: $t) -> Option<Self> {
                    Some(self - step)
                }
            }
        )*
    };
}

impl_range_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize);
impl_range_unsigned!(u8, u16, u32, u64, u128, usize);
impl_range_float!(f32, f64);

impl RangeValue for char {
    type Step = u32;

    fn unit_step() -> u32 {
        1
    }

    fn is_valid_step(step: u32) -> bool {
        step != 0
    }

    fn distance(self, other: Self) -> u32 {
        (self as u32).abs_diff(other as u32)
    }

    fn step_up(self, step: u32) -> Option<Self> {
        (self as u32).checked_add(step).and_then(char::from_u32)
    }

    fn step_down(self, step: u32) -> Option<Self> {
        (self as u32).checked_sub(step).and_then(char::from_u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_elements() {
        assert_eq!(i32::identity(), 0);
        assert_eq!(f64::identity(), 0.0);
        assert_eq!(String::identity(), "");
    }

    #[test]
    fn test_string_combine_concatenates() {
        let s = "s1 ".to_string().combine("s2".to_string());
        assert_eq!(s, "s1 s2");
    }

    #[test]
    fn test_signed_distance_does_not_overflow() {
        assert_eq!(i8::MIN.distance(i8::MAX), 255u8);
        assert_eq!(i8::MAX.step_up(1), None);
        assert_eq!((-3i32).step_up(5), Some(2));
    }

    #[test]
    fn test_char_steps() {
        assert_eq!('a'.step_up(2), Some('c'));
        assert_eq!('a'.distance('e'), 4);
        assert_eq!('\0'.step_down(1), None);
    }

    #[test]
    fn test_float_step_validity() {
        assert!(f64::is_valid_step(0.5));
        assert!(!f64::is_valid_step(0.0));
        assert!(!f64::is_valid_step(-1.0));
        assert!(!f64::is_valid_step(f64::NAN));
    }
}
