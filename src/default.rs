//! The ordering used by heaps that are not given a comparator: numbers compare
//! numerically and text compares lexicographically.
//!
//! Only types implementing [`NaturalOrder`] can be ordered this way.  Values of mixed
//! kind can be wrapped in [`Primitive`], which falls back to comparing the textual
//! rendering of both operands whenever they are not both numbers.

use crate::Comparator;
use alloc::borrow::Cow;
use alloc::format;
use alloc::string::{String, ToString};
use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;

/// The default three-way comparison of two primitive-like values.
///
/// ```
/// use core::cmp::Ordering;
/// use prioheap::default_compare;
///
/// assert_eq!(default_compare("jano", "valentina"), Ordering::Less);
/// assert_eq!(default_compare("foobar", "foobar"), Ordering::Equal);
/// assert_eq!(default_compare(&10, &1000), Ordering::Less);
/// ```
#[inline]
pub fn default_compare<T: ?Sized + NaturalOrder>(this: &T, that: &T) -> Ordering {
    this.natural_cmp(that)
}

/// Types with a built-in priority order: numeric for numbers, lexicographic for text.
pub trait NaturalOrder {
    /// Compares `self` with `other`; [`Ordering::Greater`] means `self` ranks higher.
    fn natural_cmp(&self, other: &Self) -> Ordering;
}

/// A zero-sized comparator that delegates to the [`NaturalOrder`] implementation
/// of its type parameter `T`.
pub struct DefaultOrder<T: ?Sized>(PhantomData<fn(&T)>);

impl<T: ?Sized> DefaultOrder<T> {
    /// Creates the default comparator.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: ?Sized> Default for DefaultOrder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for DefaultOrder<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for DefaultOrder<T> {}

impl<T: ?Sized> fmt::Debug for DefaultOrder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultOrder")
    }
}

impl<T: ?Sized + NaturalOrder> Comparator<T> for DefaultOrder<T> {
    #[inline]
    fn compare(&self, this: &T, that: &T) -> Ordering {
        this.natural_cmp(that)
    }
}

macro_rules! natural_keys {
    // end of recursion
    () => {};

    // totally ordered types delegate to `Ord`
    (ord $($t:ty),+ $(; $($rest:tt)*)?) => {
        $(
            impl NaturalOrder for $t {
                #[inline]
                fn natural_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )+

        $(natural_keys!($($rest)*);)?
    };

    // floats order numerically, with NaNs placed by their total order
    (float $($t:ty),+ $(; $($rest:tt)*)?) => {
        $(
            impl NaturalOrder for $t {
                #[inline]
                fn natural_cmp(&self, other: &Self) -> Ordering {
                    self.partial_cmp(other).unwrap_or_else(|| self.total_cmp(other))
                }
            }
        )+

        $(natural_keys!($($rest)*);)?
    };
}

natural_keys! {
    ord bool, char, i8, u8, i16, u16, i32, u32, i64, u64, i128, u128, isize, usize, str, String;
    float f32, f64
}

impl NaturalOrder for Cow<'_, str> {
    #[inline]
    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.as_ref().cmp(other.as_ref())
    }
}

impl<T: ?Sized + NaturalOrder> NaturalOrder for &T {
    #[inline]
    fn natural_cmp(&self, other: &Self) -> Ordering {
        (**self).natural_cmp(*other)
    }
}

impl<T: ?Sized + NaturalOrder> NaturalOrder for &mut T {
    #[inline]
    fn natural_cmp(&self, other: &Self) -> Ordering {
        (**self).natural_cmp(&**other)
    }
}

/// A value that is either a number or text.
///
/// Two numbers compare numerically.  Any other pairing compares the [`Display`]
/// renderings of both values lexicographically, so `Number(10.0)` sorts against
/// `Text("9")` as `"10"` against `"9"`.
///
/// Numbers render the way JavaScript's `String(number)` does: integral values carry no
/// fraction, non-finite values read `NaN`, `Infinity` and `-Infinity`, negative zero
/// reads `0`, and magnitudes of at least `1e21` or below `1e-6` use a signed exponent
/// (`1e+21`, `1.5e-7`).
///
/// ```
/// use core::cmp::Ordering;
/// use prioheap::{default_compare, Primitive};
///
/// let ten = Primitive::from(10);
/// assert_eq!(default_compare(&ten, &Primitive::from(9)), Ordering::Greater);
/// assert_eq!(default_compare(&ten, &Primitive::from("9")), Ordering::Less);
/// ```
///
/// [`Display`]: fmt::Display
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// A numeric value.
    Number(f64),
    /// A textual value.
    Text(String),
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Number(n) => write_number(*n, f),
            Primitive::Text(s) => f.write_str(s),
        }
    }
}

fn write_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        return f.write_str("0");
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{n}");
    }
    let exponential = format!("{n:e}");
    match exponential.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => write!(f, "{mantissa}e+{power}"),
        _ => f.write_str(&exponential),
    }
}

impl NaturalOrder for Primitive {
    fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Primitive::Number(a), Primitive::Number(b)) => a.natural_cmp(b),
            (Primitive::Text(a), Primitive::Text(b)) => a.cmp(b),
            (a, b) => a.to_string().cmp(&b.to_string()),
        }
    }
}

macro_rules! primitive_from {
    ($($t:ty => $variant:ident($conv:expr)),+ $(,)?) => {
        $(
            impl From<$t> for Primitive {
                fn from(value: $t) -> Self {
                    Primitive::$variant($conv(value))
                }
            }
        )+
    };
}

primitive_from! {
    f64 => Number(core::convert::identity),
    f32 => Number(f64::from),
    i32 => Number(f64::from),
    u32 => Number(f64::from),
    i16 => Number(f64::from),
    u16 => Number(f64::from),
    i8 => Number(f64::from),
    u8 => Number(f64::from),
    String => Text(core::convert::identity),
    &str => Text(String::from),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_strings() {
        assert_eq!(default_compare("jano", "valentina"), Ordering::Less);
        assert_eq!(default_compare("foobar", "foobar"), Ordering::Equal);
        assert_eq!(default_compare("zzz", "aaa"), Ordering::Greater);
        assert_eq!(default_compare("jano", "fran"), Ordering::Greater);

        let owned = String::from("jano");
        assert_eq!(default_compare(&owned, &String::from("valentina")), Ordering::Less);
        assert_eq!(
            default_compare(&Cow::Borrowed("zzz"), &Cow::Owned(String::from("aaa"))),
            Ordering::Greater
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(default_compare(&10, &1000), Ordering::Less);
        assert_eq!(default_compare(&10, &10), Ordering::Equal);
        assert_eq!(default_compare(&10, &1), Ordering::Greater);
        assert_eq!(default_compare(&-3i64, &2i64), Ordering::Less);
        assert_eq!(default_compare(&2.5f64, &-0.5f64), Ordering::Greater);
    }

    #[test]
    fn test_floats_are_totally_ordered() {
        assert_eq!(default_compare(&0.0f64, &-0.0f64), Ordering::Equal);
        assert_eq!(default_compare(&f64::NAN, &f64::INFINITY), Ordering::Greater);
        assert_eq!(default_compare(&f64::NAN, &f64::NAN), Ordering::Equal);
        assert_eq!(default_compare(&1.0f32, &f32::NAN), Ordering::Less);
    }

    #[test]
    fn test_references_delegate() {
        let (a, b) = (3u8, 7u8);
        assert_eq!(default_compare(&&a, &&b), Ordering::Less);
        let order = DefaultOrder::<&str>::new();
        assert_eq!(order.compare(&"b", &"a"), Ordering::Greater);
    }

    #[test]
    fn test_primitive_numbers_compare_numerically() {
        let mut values: Vec<Primitive> =
            vec![Primitive::from(10), Primitive::from(9), Primitive::from(100)];
        values.sort_by(default_compare);
        assert_eq!(values, [Primitive::from(9), Primitive::from(10), Primitive::from(100)]);
    }

    #[test]
    fn test_primitive_mixed_compare_as_text() {
        assert_eq!(default_compare(&Primitive::from(10), &Primitive::from("9")), Ordering::Less);
        assert_eq!(default_compare(&Primitive::from("10"), &Primitive::from(10)), Ordering::Equal);
        assert_eq!(default_compare(&Primitive::from(2.5), &Primitive::from("2")), Ordering::Greater);
        assert_eq!(Primitive::from(10).to_string(), "10");
    }

    #[test]
    fn test_primitive_renders_numbers_like_javascript() {
        let rendered = |n: f64| Primitive::from(n).to_string();
        assert_eq!(rendered(f64::INFINITY), "Infinity");
        assert_eq!(rendered(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(rendered(f64::NAN), "NaN");
        assert_eq!(rendered(-0.0), "0");
        assert_eq!(rendered(123.5), "123.5");
        assert_eq!(rendered(-42.0), "-42");
        assert_eq!(rendered(0.000001), "0.000001");
        assert_eq!(rendered(1.5e-7), "1.5e-7");
        assert_eq!(rendered(1e20), "100000000000000000000");
        assert_eq!(rendered(1e21), "1e+21");
        assert_eq!(rendered(-2.5e30), "-2.5e+30");
    }

    #[test]
    fn test_primitive_non_finite_compares_as_its_text() {
        let infinity = Primitive::from(f64::INFINITY);
        assert_eq!(default_compare(&infinity, &Primitive::from("Infinity")), Ordering::Equal);
        assert_eq!(default_compare(&Primitive::from(1e21), &Primitive::from("1e+21")), Ordering::Equal);
        assert_eq!(default_compare(&infinity, &Primitive::from("J")), Ordering::Less);
    }
}
