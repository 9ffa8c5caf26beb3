//! Label dictionary, sentinel table and value coercions
//!
//! The site shows a fixed placeholder for every statistic it has no data for.
//! Each recognized label maps to exactly one [`FighterField`], which knows its
//! placeholder and how to coerce the remaining text into a typed value.

use crate::records::FighterRecord;
use crate::ScrapeError;

/// A recognized category on the fighter detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FighterField {
    Height,
    Weight,
    Reach,
    Stance,
    Slpm,
    StrAcc,
    Sapm,
    StrDef,
    TdAvg,
    TdAcc,
    TdDef,
    SubAvg,
}

/// How the text after the label becomes a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Stored as shown
    Text,
    /// Leading integer before the unit, e.g. `155 lbs.`
    LeadingInteger,
    /// Integer followed by an inch mark, e.g. `72"`
    Inches,
    Decimal,
    /// Percentage text divided by 100
    Percentage,
}

impl FighterField {
    /// Matching order. The first label substring found wins.
    pub const ALL: [FighterField; 12] = [
        Self::Height,
        Self::Weight,
        Self::Reach,
        Self::Stance,
        Self::Slpm,
        Self::StrAcc,
        Self::Sapm,
        Self::StrDef,
        Self::TdAvg,
        Self::TdAcc,
        Self::TdDef,
        Self::SubAvg,
    ];

    /// Resolves a page label to its field
    ///
    /// Returns `None` for labels outside the dictionary; callers ignore those.
    /// Matching ignores case since the site renders some labels in capitals
    /// (`STANCE:`).
    pub fn classify(label: &str) -> Option<Self> {
        let label = label.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| label.contains(&field.label().to_lowercase()))
    }

    /// Substring identifying this field's label on the page
    pub fn label(self) -> &'static str {
        match self {
            Self::Height => "Height",
            Self::Weight => "Weight",
            Self::Reach => "Reach",
            Self::Stance => "Stance",
            Self::Slpm => "SLpM",
            Self::StrAcc => "Str. Acc",
            Self::Sapm => "SApM",
            Self::StrDef => "Str. Def",
            Self::TdAvg => "TD Avg",
            Self::TdAcc => "TD Acc",
            Self::TdDef => "TD Def",
            Self::SubAvg => "Sub. Avg",
        }
    }

    /// Placeholder text meaning "not reported"
    pub fn sentinel(self) -> &'static str {
        match self {
            Self::Height | Self::Weight | Self::Reach | Self::Stance => "--",
            Self::Slpm | Self::Sapm | Self::TdAvg => "0.00",
            Self::StrAcc | Self::StrDef | Self::TdAcc | Self::TdDef => "0%",
            Self::SubAvg => "0.0",
        }
    }

    pub fn coercion(self) -> Coercion {
        match self {
            Self::Height | Self::Stance => Coercion::Text,
            Self::Weight => Coercion::LeadingInteger,
            Self::Reach => Coercion::Inches,
            Self::Slpm | Self::Sapm | Self::TdAvg | Self::SubAvg => Coercion::Decimal,
            Self::StrAcc | Self::StrDef | Self::TdAcc | Self::TdDef => Coercion::Percentage,
        }
    }

    /// Column name in the `fighters` table
    pub fn column(self) -> &'static str {
        match self {
            Self::Height => "height",
            Self::Weight => "weight",
            Self::Reach => "reach",
            Self::Stance => "stance",
            Self::Slpm => "slpm",
            Self::StrAcc => "str_acc",
            Self::Sapm => "sapm",
            Self::StrDef => "str_def",
            Self::TdAvg => "td_avg",
            Self::TdAcc => "td_acc",
            Self::TdDef => "td_def",
            Self::SubAvg => "sub_avg",
        }
    }

    /// Coerces `raw` and stores it in the matching slot of `record`
    ///
    /// Blank text and the sentinel both leave the slot `None`. Text that is
    /// neither and does not fit the coercion is a [`ScrapeError::Parse`].
    pub fn apply(self, record: &mut FighterRecord, raw: &str) -> Result<(), ScrapeError> {
        let value = self.reported(raw);

        match self {
            Self::Height => record.height = value.map(str::to_string),
            Self::Stance => record.stance = value.map(str::to_string),
            Self::Weight => record.weight = value.map(|v| self.integer(v)).transpose()?,
            Self::Reach => record.reach = value.map(|v| self.integer(v)).transpose()?,
            Self::Slpm => record.slpm = value.map(|v| self.number(v)).transpose()?,
            Self::StrAcc => record.str_acc = value.map(|v| self.number(v)).transpose()?,
            Self::Sapm => record.sapm = value.map(|v| self.number(v)).transpose()?,
            Self::StrDef => record.str_def = value.map(|v| self.number(v)).transpose()?,
            Self::TdAvg => record.td_avg = value.map(|v| self.number(v)).transpose()?,
            Self::TdAcc => record.td_acc = value.map(|v| self.number(v)).transpose()?,
            Self::TdDef => record.td_def = value.map(|v| self.number(v)).transpose()?,
            Self::SubAvg => record.sub_avg = value.map(|v| self.number(v)).transpose()?,
        }

        Ok(())
    }

    /// Trimmed text, or `None` when blank or equal to the sentinel
    fn reported(self, raw: &str) -> Option<&str> {
        let value = raw.trim();
        if value.is_empty() || value == self.sentinel() {
            None
        } else {
            Some(value)
        }
    }

    fn integer(self, value: &str) -> Result<i32, ScrapeError> {
        let digits = match self.coercion() {
            Coercion::LeadingInteger => {
                let end = value
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(value.len());
                &value[..end]
            }
            Coercion::Inches => value.trim_end_matches('"').trim(),
            _ => value,
        };

        digits.parse::<i32>().map_err(|_| self.parse_error(value))
    }

    fn number(self, value: &str) -> Result<f64, ScrapeError> {
        match self.coercion() {
            Coercion::Percentage => {
                let percent = parse_finite(value.trim_end_matches('%').trim())
                    .ok_or_else(|| self.parse_error(value))?;
                if !(0.0..=100.0).contains(&percent) {
                    return Err(self.parse_error(value));
                }
                Ok(percent / 100.0)
            }
            _ => parse_finite(value).ok_or_else(|| self.parse_error(value)),
        }
    }

    fn parse_error(self, value: &str) -> ScrapeError {
        ScrapeError::Parse {
            field: self.column(),
            value: value.to_string(),
        }
    }
}

/// Parses a decimal, rejecting `NaN` and infinities
fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Returns the text after `label` when `text` contains it
///
/// Only the first occurrence of the label is removed and the rest is trimmed.
pub fn strip_label(text: &str, label: &str) -> Option<String> {
    text.contains(label)
        .then(|| text.replacen(label, "", 1).trim().to_string())
}
