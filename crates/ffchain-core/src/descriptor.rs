//! Value contracts for individual command-line options.
//!
//! A descriptor owns no state. It turns a [`RawValue`] into a normalized
//! value (or a typed error) and renders a normalized value as tokens. Option
//! groups declare one `static` descriptor per attribute and pair it with a
//! [`Field`](crate::field::Field) that holds the current value.

use std::fmt::Debug;

use crate::{
    error::{Error, Result},
    regex,
    value::RawValue,
};

pub trait Descriptor: Sync + 'static {
    type Value: Clone + Debug + PartialEq;

    /// Normalizes `raw`. `name` is the attribute name used in errors.
    fn validate(&self, name: &str, raw: RawValue) -> Result<Self::Value>;

    fn to_args(&self, value: &Self::Value) -> Vec<String>;
}

/// A string restricted to a fixed set, such as codec or pixel format names.
#[derive(Debug)]
pub struct Choice {
    flag:    &'static str,
    choices: &'static [&'static str],
}

impl Choice {
    pub const fn new(flag: &'static str, choices: &'static [&'static str]) -> Self {
        Self { flag, choices }
    }
}

impl Descriptor for Choice {
    type Value = String;

    fn validate(&self, name: &str, raw: RawValue) -> Result<String> {
        let RawValue::Str(s) = raw else {
            return Err(Error::type_mismatch(name, "str", raw.kind()));
        };
        if self.choices.contains(&s.as_str()) {
            Ok(s)
        } else {
            Err(Error::InvalidChoice {
                name:    name.to_owned(),
                value:   s,
                allowed: self.choices,
            })
        }
    }

    fn to_args(&self, value: &String) -> Vec<String> {
        vec![self.flag.into(), value.clone()]
    }
}

/// A boolean that maps to up to two switches, e.g. `-y`/`-n`.
///
/// A side without a switch renders nothing.
#[derive(Debug)]
pub struct Flag {
    on:  Option<&'static str>,
    off: Option<&'static str>,
}

impl Flag {
    pub const fn new(on: Option<&'static str>, off: Option<&'static str>) -> Self {
        Self { on, off }
    }

    /// A switch with no negative form.
    pub const fn single(on: &'static str) -> Self {
        Self::new(Some(on), None)
    }

    pub const fn pair(on: &'static str, off: &'static str) -> Self {
        Self::new(Some(on), Some(off))
    }
}

impl Descriptor for Flag {
    type Value = bool;

    fn validate(&self, name: &str, raw: RawValue) -> Result<bool> {
        match raw {
            RawValue::Bool(b) => Ok(b),
            other => Err(Error::type_mismatch(name, "bool", other.kind())),
        }
    }

    fn to_args(&self, value: &bool) -> Vec<String> {
        let switch = if *value { self.on } else { self.off };
        switch.into_iter().map(Into::into).collect()
    }
}

/// An integer with optional inclusive bounds. Booleans and floats are
/// rejected.
#[derive(Debug)]
pub struct Int {
    flag: &'static str,
    min:  Option<i64>,
    max:  Option<i64>,
}

impl Int {
    pub const fn new(flag: &'static str) -> Self {
        Self {
            flag,
            min: None,
            max: None,
        }
    }

    pub const fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    pub const fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }
}

impl Descriptor for Int {
    type Value = i64;

    fn validate(&self, name: &str, raw: RawValue) -> Result<i64> {
        let RawValue::Int(v) = raw else {
            return Err(Error::type_mismatch(name, "int", raw.kind()));
        };
        if let Some(min) = self.min.filter(|min| v < *min) {
            return Err(Error::range(name, format!("must be >= {min}, got {v}")));
        }
        if let Some(max) = self.max.filter(|max| v > *max) {
            return Err(Error::range(name, format!("must be <= {max}, got {v}")));
        }
        Ok(v)
    }

    fn to_args(&self, value: &i64) -> Vec<String> {
        vec![self.flag.into(), value.to_string()]
    }
}

/// A finite number with optional inclusive bounds. Integers are accepted.
#[derive(Debug)]
pub struct Float {
    flag: &'static str,
    min:  Option<f64>,
    max:  Option<f64>,
}

impl Float {
    pub const fn new(flag: &'static str) -> Self {
        Self {
            flag,
            min: None,
            max: None,
        }
    }

    pub const fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub const fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

impl Descriptor for Float {
    type Value = f64;

    fn validate(&self, name: &str, raw: RawValue) -> Result<f64> {
        let v = match raw {
            RawValue::Float(v) => v,
            RawValue::Int(v) => v as f64,
            other => return Err(Error::type_mismatch(name, "float or int", other.kind())),
        };
        if !v.is_finite() {
            return Err(Error::invalid(name, v, "must be finite"));
        }
        if let Some(min) = self.min.filter(|min| v < *min) {
            return Err(Error::range(name, format!("must be >= {min}, got {v}")));
        }
        if let Some(max) = self.max.filter(|max| v > *max) {
            return Err(Error::range(name, format!("must be <= {max}, got {v}")));
        }
        Ok(v)
    }

    fn to_args(&self, value: &f64) -> Vec<String> {
        vec![self.flag.into(), value.to_string()]
    }
}

/// A seek position or length.
///
/// Structured input renders as `HH:MM:SS.mmm`, plain seconds as `S.mmm`.
#[derive(Debug)]
pub struct Time {
    flag: &'static str,
}

impl Time {
    pub const fn new(flag: &'static str) -> Self {
        Self { flag }
    }
}

impl Descriptor for Time {
    type Value = String;

    fn validate(&self, name: &str, raw: RawValue) -> Result<String> {
        match raw {
            RawValue::Time(ts) => {
                let Some(total) = ts.total_millis() else {
                    return Err(Error::range(name, "time out of range"));
                };
                if total < 0 {
                    return Err(Error::range(name, "time cannot be negative"));
                }
                let (hours, rest) = (total / 3_600_000, total % 3_600_000);
                let (minutes, rest) = (rest / 60_000, rest % 60_000);
                let (seconds, millis) = (rest / 1000, rest % 1000);
                Ok(format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}"))
            },
            RawValue::Int(secs) if secs < 0 => {
                Err(Error::range(name, "time cannot be negative"))
            },
            RawValue::Int(secs) => Ok(format!("{secs}.000")),
            RawValue::Float(secs) if !secs.is_finite() => {
                Err(Error::invalid(name, secs, "must be finite"))
            },
            RawValue::Float(secs) if secs < 0.0 => {
                Err(Error::range(name, "time cannot be negative"))
            },
            RawValue::Float(secs) => Ok(format!("{secs:.3}")),
            other => Err(Error::type_mismatch(name, "time, int or float", other.kind())),
        }
    }

    fn to_args(&self, value: &String) -> Vec<String> {
        vec![self.flag.into(), value.clone()]
    }
}

/// Audio sample rate in Hz. Strings may carry a `k` suffix.
#[derive(Debug)]
pub struct SampleRate {
    flag: &'static str,
}

impl SampleRate {
    pub const fn new(flag: &'static str) -> Self {
        Self { flag }
    }
}

impl Descriptor for SampleRate {
    type Value = u32;

    fn validate(&self, name: &str, raw: RawValue) -> Result<u32> {
        let hz = match &raw {
            RawValue::Int(v) => *v as f64,
            RawValue::Float(v) => v.trunc(),
            RawValue::Str(s) => parse_scaled(name, s, &[('k', 1e3)])?,
            other => return Err(Error::type_mismatch(name, "int, float or str", other.kind())),
        };
        if !hz.is_finite() || hz < 1.0 || hz > f64::from(u32::MAX) {
            return Err(Error::invalid(name, &raw, "sample rate must be a positive integer"));
        }
        Ok(hz as u32)
    }

    fn to_args(&self, value: &u32) -> Vec<String> {
        vec![self.flag.into(), value.to_string()]
    }
}

/// Bits per second. Strings may carry a `k` or `m` suffix.
#[derive(Debug)]
pub struct Bitrate {
    flag: &'static str,
}

impl Bitrate {
    pub const fn new(flag: &'static str) -> Self {
        Self { flag }
    }
}

impl Descriptor for Bitrate {
    type Value = u64;

    fn validate(&self, name: &str, raw: RawValue) -> Result<u64> {
        let bps = match &raw {
            RawValue::Int(v) => u64::try_from(*v).ok().filter(|v| *v > 0),
            RawValue::Str(s) => {
                let bps = parse_scaled(name, s, &[('k', 1e3), ('m', 1e6)])?;
                (bps.is_finite() && bps >= 1.0 && bps <= u64::MAX as f64).then_some(bps as u64)
            },
            other => return Err(Error::type_mismatch(name, "int or str", other.kind())),
        };
        bps.ok_or_else(|| Error::invalid(name, &raw, "bitrate must be positive"))
    }

    fn to_args(&self, value: &u64) -> Vec<String> {
        vec![self.flag.into(), value.to_string()]
    }
}

/// Parses a decimal number with an optional single-letter multiplier suffix
/// and truncates it to a whole number.
fn parse_scaled(name: &str, s: &str, suffixes: &[(char, f64)]) -> Result<f64> {
    let lowered = s.trim().to_ascii_lowercase();
    let (digits, multiplier) = suffixes
        .iter()
        .find_map(|&(suffix, mult)| lowered.strip_suffix(suffix).map(|d| (d, mult)))
        .unwrap_or((lowered.as_str(), 1.0));

    let number: f64 = digits
        .trim()
        .parse()
        .map_err(|_| Error::invalid(name, s, "not a number"))?;

    // "44.1k" is 44100.00000000001 after scaling; snap such results back to
    // the integer they were meant to be before truncating.
    let scaled = number * multiplier;
    let nearest = scaled.round();
    Ok(if (scaled - nearest).abs() < 1e-6 {
        nearest
    } else {
        scaled.trunc()
    })
}

/// A frame size: `WIDTHxHEIGHT` or a named alias such as `hd720`.
#[derive(Debug)]
pub struct VideoSize {
    flag:    &'static str,
    aliases: &'static [&'static str],
}

impl VideoSize {
    pub const fn new(flag: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { flag, aliases }
    }
}

impl Descriptor for VideoSize {
    type Value = String;

    fn validate(&self, name: &str, raw: RawValue) -> Result<String> {
        let RawValue::Str(s) = raw else {
            return Err(Error::type_mismatch(name, "str", raw.kind()));
        };
        let lowered = s.to_ascii_lowercase();
        if self.aliases.contains(&lowered.as_str()) || regex!(r"^\d+x\d+$").is_match(&lowered) {
            Ok(lowered)
        } else {
            Err(Error::invalid(name, s, "expected WIDTHxHEIGHT or a known size alias"))
        }
    }

    fn to_args(&self, value: &String) -> Vec<String> {
        vec![self.flag.into(), value.clone()]
    }
}

/// Ordered `key=value` pairs, one flag per pair.
#[derive(Debug)]
pub struct Metadata {
    flag: &'static str,
}

impl Metadata {
    pub const fn new(flag: &'static str) -> Self {
        Self { flag }
    }
}

impl Descriptor for Metadata {
    type Value = Vec<(String, String)>;

    fn validate(&self, name: &str, raw: RawValue) -> Result<Self::Value> {
        match raw {
            RawValue::Map(pairs) => Ok(pairs),
            other => Err(Error::type_mismatch(name, "map", other.kind())),
        }
    }

    fn to_args(&self, value: &Self::Value) -> Vec<String> {
        value
            .iter()
            .filter(|(k, v)| !k.is_empty() && !v.is_empty())
            .flat_map(|(k, v)| [self.flag.to_owned(), format!("{k}={v}")])
            .collect()
    }
}

/// A non-empty string passed through as-is, e.g. encoder private params.
#[derive(Debug)]
pub struct Text {
    flag: &'static str,
}

impl Text {
    pub const fn new(flag: &'static str) -> Self {
        Self { flag }
    }
}

impl Descriptor for Text {
    type Value = String;

    fn validate(&self, name: &str, raw: RawValue) -> Result<String> {
        match raw {
            RawValue::Str(s) if s.trim().is_empty() => Err(Error::invalid(name, s, "empty")),
            RawValue::Str(s) => Ok(s),
            other => Err(Error::type_mismatch(name, "str", other.kind())),
        }
    }

    fn to_args(&self, value: &String) -> Vec<String> {
        vec![self.flag.into(), value.clone()]
    }
}
