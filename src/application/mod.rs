// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training or evaluating a saved model).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No UI or printing here (that's Layer 1)
//   - No direct file parsing (that's Layer 4 and 6)
//   - Only workflow coordination

// Fetch, split, fit, evaluate, save
pub mod train_use_case;

// Reload a saved model and score a labelled file
pub mod evaluate_use_case;

#[cfg(test)]
pub(crate) mod test_support {
    use std::{fs, io::Write, path::Path};

    pub const HEADER: &str = "age,workclass,fnlwgt,education,education-num,marital-status,occupation,relationship,ethnicity,sex,capital-gain,capital-loss,hours-per-week,native-country-region,IsOver50K";

    /// Census-like rows where the label is decided by education-num:
    /// low (2..=6) → false, high (11..=15) → true.
    pub fn write_synthetic_census(path: &Path, rows: usize) {
        let marital    = ["Never-married", "Married-civ-spouse", "Divorced"];
        let occupation = ["Sales", "Exec-managerial", "Craft-repair", "Adm-clerical"];
        let sex        = ["Male", "Female"];
        let country    = ["United-States", "United-States", "Mexico", "India"];

        let mut f = fs::File::create(path).unwrap();
        writeln!(f, "{HEADER}").unwrap();
        for i in 0..rows {
            let high = i % 2 == 0;
            let edu  = if high { 11 + i % 5 } else { 2 + i % 5 };
            writeln!(
                f,
                "{},Private,{},Some-college,{},{},{},Husband,White,{},0,0,{},{},{}",
                20 + i % 40,
                100000 + i,
                edu,
                marital[i % 3],
                occupation[i % 4],
                sex[(i / 3) % 2],
                30 + i % 25,
                country[i % 4],
                if high { 1 } else { 0 },
            )
            .unwrap();
        }
    }
}
