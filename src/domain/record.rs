// ============================================================
// Layer 3 — Census Record and Schema
// ============================================================
// The adult census file has a fixed 15-column layout:
//
//   idx  column                  kind
//   ───  ──────────────────────  ───────
//    0   age                     numeric
//    1   workclass               text
//    2   fnlwgt                  numeric
//    3   education               text
//    4   education-num           numeric
//    5   marital-status          text
//    6   occupation              text
//    7   relationship            text
//    8   ethnicity               text
//    9   sex                     text
//   10   capital-gain            numeric
//   11   capital-loss            numeric
//   12   hours-per-week          numeric
//   13   native-country-region   text
//   14   IsOver50K               boolean (the label)
//
// The Column enum is declared in file order so that
// `column as usize` is the position of the cell in a row.

use serde::{Deserialize, Serialize};

/// How a cell of a given column is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
    Boolean,
}

/// One column of the census schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Age,
    Workclass,
    Fnlwgt,
    Education,
    EducationNum,
    MaritalStatus,
    Occupation,
    Relationship,
    Ethnicity,
    Sex,
    CapitalGain,
    CapitalLoss,
    HoursPerWeek,
    NativeCountry,
    IsOver50K,
}

impl Column {
    /// Every column, in file order.
    pub const ALL: [Column; 15] = [
        Column::Age,
        Column::Workclass,
        Column::Fnlwgt,
        Column::Education,
        Column::EducationNum,
        Column::MaritalStatus,
        Column::Occupation,
        Column::Relationship,
        Column::Ethnicity,
        Column::Sex,
        Column::CapitalGain,
        Column::CapitalLoss,
        Column::HoursPerWeek,
        Column::NativeCountry,
        Column::IsOver50K,
    ];

    /// Zero-based position of this column in a row
    pub fn index(self) -> usize {
        self as usize
    }

    /// Header name as it appears in the data file
    pub fn name(self) -> &'static str {
        match self {
            Column::Age           => "age",
            Column::Workclass     => "workclass",
            Column::Fnlwgt        => "fnlwgt",
            Column::Education     => "education",
            Column::EducationNum  => "education-num",
            Column::MaritalStatus => "marital-status",
            Column::Occupation    => "occupation",
            Column::Relationship  => "relationship",
            Column::Ethnicity     => "ethnicity",
            Column::Sex           => "sex",
            Column::CapitalGain   => "capital-gain",
            Column::CapitalLoss   => "capital-loss",
            Column::HoursPerWeek  => "hours-per-week",
            Column::NativeCountry => "native-country-region",
            Column::IsOver50K     => "IsOver50K",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Age
            | Column::Fnlwgt
            | Column::EducationNum
            | Column::CapitalGain
            | Column::CapitalLoss
            | Column::HoursPerWeek => ColumnKind::Numeric,
            Column::IsOver50K => ColumnKind::Boolean,
            _ => ColumnKind::Text,
        }
    }
}

/// One row of the census dataset.
///
/// Numeric cells that were empty in the file hold `NaN`;
/// an empty label cell is `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CensusRecord {
    pub age:             f32,
    pub workclass:       String,
    pub fnlwgt:          f32,
    pub education:       String,
    pub education_num:   f32,
    pub marital_status:  String,
    pub occupation:      String,
    pub relationship:    String,
    pub ethnicity:       String,
    pub sex:             String,
    pub capital_gain:    f32,
    pub capital_loss:    f32,
    pub hours_per_week:  f32,
    pub native_country:  String,
    pub is_over_50k:     Option<bool>,
}

impl CensusRecord {
    /// Value of a numeric column, or None if `column` is not numeric
    pub fn numeric(&self, column: Column) -> Option<f32> {
        let v = match column {
            Column::Age          => self.age,
            Column::Fnlwgt       => self.fnlwgt,
            Column::EducationNum => self.education_num,
            Column::CapitalGain  => self.capital_gain,
            Column::CapitalLoss  => self.capital_loss,
            Column::HoursPerWeek => self.hours_per_week,
            _ => return None,
        };
        Some(v)
    }

    /// Value of a text column, or None if `column` is not text
    pub fn text(&self, column: Column) -> Option<&str> {
        let v = match column {
            Column::Workclass     => &self.workclass,
            Column::Education     => &self.education,
            Column::MaritalStatus => &self.marital_status,
            Column::Occupation    => &self.occupation,
            Column::Relationship  => &self.relationship,
            Column::Ethnicity     => &self.ethnicity,
            Column::Sex           => &self.sex,
            Column::NativeCountry => &self.native_country,
            _ => return None,
        };
        Some(v.as_str())
    }

    pub fn set_numeric(&mut self, column: Column, value: f32) {
        match column {
            Column::Age          => self.age = value,
            Column::Fnlwgt       => self.fnlwgt = value,
            Column::EducationNum => self.education_num = value,
            Column::CapitalGain  => self.capital_gain = value,
            Column::CapitalLoss  => self.capital_loss = value,
            Column::HoursPerWeek => self.hours_per_week = value,
            _ => {}
        }
    }

    pub fn set_text(&mut self, column: Column, value: impl Into<String>) {
        let value = value.into();
        match column {
            Column::Workclass     => self.workclass = value,
            Column::Education     => self.education = value,
            Column::MaritalStatus => self.marital_status = value,
            Column::Occupation    => self.occupation = value,
            Column::Relationship  => self.relationship = value,
            Column::Ethnicity     => self.ethnicity = value,
            Column::Sex           => self.sex = value,
            Column::NativeCountry => self.native_country = value,
            _ => {}
        }
    }

    /// The IsOver50K label
    pub fn label(&self) -> Option<bool> {
        self.is_over_50k
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_in_file_order() {
        for (i, c) in Column::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        assert_eq!(Column::NativeCountry.index(), 13);
        assert_eq!(Column::IsOver50K.index(), 14);
    }

    #[test]
    fn test_column_kinds() {
        let numeric = Column::ALL.iter().filter(|c| c.kind() == ColumnKind::Numeric).count();
        let text    = Column::ALL.iter().filter(|c| c.kind() == ColumnKind::Text).count();
        assert_eq!(numeric, 6);
        assert_eq!(text, 8);
        assert_eq!(Column::IsOver50K.kind(), ColumnKind::Boolean);
    }

    #[test]
    fn test_accessors_match_kind() {
        let mut r = CensusRecord::default();
        r.set_numeric(Column::HoursPerWeek, 40.0);
        r.set_text(Column::Sex, "Female");
        assert_eq!(r.numeric(Column::HoursPerWeek), Some(40.0));
        assert_eq!(r.text(Column::Sex), Some("Female"));
        assert_eq!(r.numeric(Column::Sex), None);
        assert_eq!(r.text(Column::Age), None);
    }
}
