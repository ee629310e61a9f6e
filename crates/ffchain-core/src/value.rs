use std::{collections::BTreeMap, fmt, time::Duration};

/// Untyped input handed to a descriptor.
///
/// Typed callers never build this by hand: every plain Rust value that an
/// option can take converts into it through `From`, so
/// `options.with_crf(23)` and `options.with_bitrate("128k")` both work.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Time(Timestamp),
    Map(Vec<(String, String)>),
}

impl RawValue {
    /// Name of the value kind, used in type mismatch errors.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Time(_) => "time",
            Self::Map(_) => "map",
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::Time(v) => write!(f, "{v:?}"),
            Self::Map(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RawValue {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for RawValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Timestamp> for RawValue {
    fn from(v: Timestamp) -> Self {
        Self::Time(v)
    }
}

impl From<Duration> for RawValue {
    fn from(v: Duration) -> Self {
        Self::Time(v.into())
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for RawValue {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Self::Map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]>
    for RawValue
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self::Map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for RawValue {
    fn from(map: BTreeMap<K, V>) -> Self {
        Self::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A structured point in time or span, split into components.
///
/// Components are signed and are not required to be in range: `minutes: 90`
/// is an hour and a half. Only the total is checked, so a negative total is
/// rejected by the time descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamp {
    pub hours:   i64,
    pub minutes: i64,
    pub seconds: i64,
    pub millis:  i64,
}

impl Timestamp {
    pub const fn new(hours: i64, minutes: i64, seconds: i64, millis: i64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            millis,
        }
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self::new(0, 0, 0, millis)
    }

    /// Builds a timestamp from fractional seconds, rounded to the nearest
    /// millisecond. Returns `None` for non-finite input or when the
    /// milliseconds do not fit in an `i64`.
    pub fn from_secs_f64(secs: f64) -> Option<Self> {
        let millis = (secs * 1000.0).round();
        (millis.is_finite() && millis.abs() < i64::MAX as f64)
            .then(|| Self::from_millis(millis as i64))
    }

    /// The whole span in milliseconds, or `None` when it does not fit in an
    /// `i64`.
    pub fn total_millis(&self) -> Option<i64> {
        self.hours
            .checked_mul(3_600_000)?
            .checked_add(self.minutes.checked_mul(60_000)?)?
            .checked_add(self.seconds.checked_mul(1000)?)?
            .checked_add(self.millis)
    }
}

/// Splits the duration into components without loss. A duration too long for
/// `total_millis` is left for the time descriptor to reject.
impl From<Duration> for Timestamp {
    fn from(d: Duration) -> Self {
        let secs = d.as_secs();
        // u64::MAX / 3600 fits in an i64; the other components are below 3600.
        let hours = i64::try_from(secs / 3600).unwrap_or(i64::MAX);
        let rest = (secs % 3600) as i64;
        let millis = i64::from((d.subsec_nanos() + 500_000) / 1_000_000);
        Self::new(hours, rest / 60, rest % 60, millis)
    }
}
