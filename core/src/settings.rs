//! Typed settings registry
//!
//! Each widget owns a [`Settings`] registry holding named, typed entries with
//! a default, an optional numeric range, and an optional visibility predicate
//! evaluated against sibling values. Entries are declared once through
//! [`Settings::add`], which returns a typed [`Key`] used for reads and writes.
//! Editors that only know setting names go through [`Settings::set_by_name`]
//! or [`Settings::set_from_str`].

use std::fmt;
use std::marker::PhantomData;
use std::mem::discriminant;
use std::ops::RangeInclusive;

use hudkit_types::{Anchor, BlurMode, Color, HudFont};
use tracing::warn;

use crate::error::SettingsError;

// ─────────────────────────────────────────────────────────────────────────────
// Values
// ─────────────────────────────────────────────────────────────────────────────

/// Untyped setting value
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    /// One option out of a closed set of labels
    Choice {
        index: usize,
        options: &'static [&'static str],
    },
    Text(String),
    Color(Color),
}

impl SettingValue {
    /// Short name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Choice { .. } => "choice",
            Self::Text(_) => "text",
            Self::Color(_) => "color",
        }
    }

    fn as_number(&self) -> Option<f32> {
        match self {
            Self::Int(v) => Some(*v as f32),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Choice { index, options } => {
                write!(f, "{}", options.get(*index).copied().unwrap_or("?"))
            }
            Self::Text(v) => write!(f, "{}", v),
            Self::Color([r, g, b, a]) => write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a),
        }
    }
}

/// Rust types that can be stored in the registry
pub trait SettingType: Sized + 'static {
    fn into_value(self) -> SettingValue;
    fn from_value(value: &SettingValue) -> Option<Self>;
}

impl SettingType for bool {
    fn into_value(self) -> SettingValue {
        SettingValue::Bool(self)
    }

    fn from_value(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl SettingType for i32 {
    fn into_value(self) -> SettingValue {
        SettingValue::Int(self)
    }

    fn from_value(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl SettingType for f32 {
    fn into_value(self) -> SettingValue {
        SettingValue::Float(self)
    }

    fn from_value(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl SettingType for String {
    fn into_value(self) -> SettingValue {
        SettingValue::Text(self)
    }

    fn from_value(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl SettingType for Color {
    fn into_value(self) -> SettingValue {
        SettingValue::Color(self)
    }

    fn from_value(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Color(v) => Some(*v),
            _ => None,
        }
    }
}

/// Closed enumerations selectable by label
pub trait Choice: Copy + PartialEq + 'static {
    fn variants() -> &'static [Self];
    fn labels() -> &'static [&'static str];
}

fn choice_into_value<C: Choice>(choice: C) -> SettingValue {
    let index = C::variants()
        .iter()
        .position(|v| *v == choice)
        .unwrap_or_default();
    SettingValue::Choice {
        index,
        options: C::labels(),
    }
}

fn choice_from_value<C: Choice>(value: &SettingValue) -> Option<C> {
    match value {
        SettingValue::Choice { index, options } if *options == C::labels() => {
            C::variants().get(*index).copied()
        }
        _ => None,
    }
}

macro_rules! choice_setting {
    ($($ty:ty),+ $(,)?) => {$(
        impl Choice for $ty {
            fn variants() -> &'static [Self] {
                <$ty>::ALL
            }

            fn labels() -> &'static [&'static str] {
                <$ty>::LABELS
            }
        }

        impl SettingType for $ty {
            fn into_value(self) -> SettingValue {
                choice_into_value(self)
            }

            fn from_value(value: &SettingValue) -> Option<Self> {
                choice_from_value(value)
            }
        }
    )+};
}

choice_setting!(Anchor, HudFont, BlurMode);

// ─────────────────────────────────────────────────────────────────────────────
// Declarations
// ─────────────────────────────────────────────────────────────────────────────

type Visibility = Box<dyn Fn(&Settings) -> bool>;

/// Declaration of a setting, consumed by [`Settings::add`]
pub struct Setting<T> {
    name: String,
    default: T,
    range: Option<RangeInclusive<f32>>,
    visible_if: Option<Visibility>,
}

impl<T: SettingType> Setting<T> {
    pub fn new(name: impl Into<String>, default: T) -> Self {
        Self {
            name: name.into(),
            default,
            range: None,
            visible_if: None,
        }
    }

    /// Only show this setting while `predicate` holds for the sibling values
    pub fn visible_when(mut self, predicate: impl Fn(&Settings) -> bool + 'static) -> Self {
        self.visible_if = Some(Box::new(predicate));
        self
    }
}

impl Setting<f32> {
    pub fn with_range(mut self, range: RangeInclusive<f32>) -> Self {
        self.range = Some(range);
        self
    }
}

impl Setting<i32> {
    pub fn with_range(mut self, range: RangeInclusive<i32>) -> Self {
        self.range = Some(*range.start() as f32..=*range.end() as f32);
        self
    }
}

/// Typed handle to an entry of one [`Settings`] registry
pub struct Key<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.index).finish()
    }
}

/// A declared setting with its current value
pub struct Entry {
    name: String,
    value: SettingValue,
    default: SettingValue,
    range: Option<RangeInclusive<f32>>,
    visible_if: Option<Visibility>,
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &SettingValue {
        &self.value
    }

    pub fn default_value(&self) -> &SettingValue {
        &self.default
    }

    pub fn range(&self) -> Option<&RangeInclusive<f32>> {
        self.range.as_ref()
    }

    pub fn is_default(&self) -> bool {
        self.value == self.default
    }

    fn visible_in(&self, settings: &Settings) -> bool {
        self.visible_if.as_ref().is_none_or(|f| f(settings))
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("default", &self.default)
            .field("range", &self.range)
            .field("conditional", &self.visible_if.is_some())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Settings {
    entries: Vec<Entry>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a setting and return its typed key
    pub fn add<T: SettingType>(&mut self, setting: Setting<T>) -> Key<T> {
        debug_assert!(
            self.entry(&setting.name).is_none(),
            "duplicate setting '{}'",
            setting.name
        );

        let value = setting.default.into_value();
        self.entries.push(Entry {
            name: setting.name,
            default: value.clone(),
            value,
            range: setting.range,
            visible_if: setting.visible_if,
        });

        Key {
            index: self.entries.len() - 1,
            _marker: PhantomData,
        }
    }

    /// Read a value through its typed key
    ///
    /// # Panics
    /// If `key` was issued by a different registry.
    pub fn get<T: SettingType>(&self, key: Key<T>) -> T {
        self.entries
            .get(key.index)
            .and_then(|entry| T::from_value(&entry.value))
            .expect("setting key used with a foreign registry")
    }

    /// Write a value through its typed key, rejecting out-of-range numbers
    ///
    /// # Panics
    /// If `key` was issued by a different registry.
    pub fn set<T: SettingType>(&mut self, key: Key<T>, value: T) -> Result<(), SettingsError> {
        let entry = &mut self.entries[key.index];
        let value = value.into_value();
        check_range(entry, &value)?;
        entry.value = value;
        Ok(())
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&SettingValue> {
        self.entry(name).map(Entry::value)
    }

    /// Write an untyped value by setting name
    ///
    /// Ints are accepted for float settings; every other kind must match.
    pub fn set_by_name(&mut self, name: &str, value: SettingValue) -> Result<(), SettingsError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| SettingsError::UnknownSetting {
                name: name.to_string(),
            })?;

        let value = coerce(entry, value)?;
        check_range(entry, &value)?;
        entry.value = value;
        Ok(())
    }

    /// Parse `input` according to the setting's kind and write it
    pub fn set_from_str(&mut self, name: &str, input: &str) -> Result<(), SettingsError> {
        let current = self.value(name).ok_or_else(|| SettingsError::UnknownSetting {
            name: name.to_string(),
        })?;
        let value = parse_value(name, current, input)?;
        self.set_by_name(name, value)
    }

    /// Whether the setting exists and its visibility predicate holds
    pub fn is_visible(&self, name: &str) -> bool {
        self.entry(name).is_some_and(|e| e.visible_in(self))
    }

    /// Restore a single setting to its default
    pub fn reset(&mut self, name: &str) -> Result<(), SettingsError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| SettingsError::UnknownSetting {
                name: name.to_string(),
            })?;
        entry.value = entry.default.clone();
        Ok(())
    }

    pub fn reset_all(&mut self) {
        for entry in &mut self.entries {
            entry.value = entry.default.clone();
        }
    }

    /// All entries in declaration order
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Entries whose visibility predicate currently holds
    pub fn visible_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.visible_in(self))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn coerce(entry: &Entry, value: SettingValue) -> Result<SettingValue, SettingsError> {
    match (&entry.value, value) {
        (SettingValue::Float(_), SettingValue::Int(v)) => Ok(SettingValue::Float(v as f32)),
        (SettingValue::Choice { options, .. }, SettingValue::Choice { index, options: given }) => {
            if *options != given {
                return Err(SettingsError::TypeMismatch {
                    name: entry.name.clone(),
                    expected: "choice",
                });
            }
            if index >= options.len() {
                return Err(SettingsError::UnknownChoice {
                    name: entry.name.clone(),
                    input: index.to_string(),
                });
            }
            Ok(SettingValue::Choice {
                index,
                options: given,
            })
        }
        (current, value) if discriminant(current) == discriminant(&value) => Ok(value),
        (current, _) => Err(SettingsError::TypeMismatch {
            name: entry.name.clone(),
            expected: current.kind(),
        }),
    }
}

fn check_range(entry: &Entry, value: &SettingValue) -> Result<(), SettingsError> {
    if let (Some(range), Some(n)) = (&entry.range, value.as_number())
        && !range.contains(&n)
    {
        warn!(setting = %entry.name, value = n, "rejected out-of-range setting");
        return Err(SettingsError::OutOfRange {
            name: entry.name.clone(),
            value: n,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}

fn parse_value(name: &str, current: &SettingValue, input: &str) -> Result<SettingValue, SettingsError> {
    let invalid = || SettingsError::InvalidInput {
        name: name.to_string(),
        input: input.to_string(),
    };
    let trimmed = input.trim();

    match current {
        SettingValue::Bool(_) => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Ok(SettingValue::Bool(true)),
            "false" | "off" | "no" | "0" => Ok(SettingValue::Bool(false)),
            _ => Err(invalid()),
        },
        SettingValue::Int(_) => trimmed.parse().map(SettingValue::Int).map_err(|_| invalid()),
        SettingValue::Float(_) => trimmed.parse().map(SettingValue::Float).map_err(|_| invalid()),
        SettingValue::Choice { options, .. } => {
            let wanted = normalize_label(trimmed);
            options
                .iter()
                .position(|label| normalize_label(label) == wanted)
                .map(|index| SettingValue::Choice { index, options })
                .ok_or_else(|| SettingsError::UnknownChoice {
                    name: name.to_string(),
                    input: input.to_string(),
                })
        }
        SettingValue::Text(_) => Ok(SettingValue::Text(input.to_string())),
        SettingValue::Color(_) => parse_hex_color(trimmed)
            .map(SettingValue::Color)
            .ok_or_else(invalid),
    }
}

/// "Right Bottom", "right_bottom" and "right-bottom" all compare equal
fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Parse `#rrggbb` or `#rrggbbaa`
fn parse_hex_color(input: &str) -> Option<Color> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 { byte(6)? } else { 255 };
    Some([byte(0)?, byte(2)?, byte(4)?, alpha])
}
