//! `validate`: check a year/day-of-year pair the way the form does.

use anyhow::bail;
use rbmc_utils::validation::validate_raw_date_input;
use rbmc_utils::DateValidation;

pub fn run_validate(year: &str, day_of_year: &str) -> anyhow::Result<()> {
    let validation = validate_raw_date_input(year, day_of_year);
    print!("{}", render_validation(&validation));
    if !validation.is_valid() {
        bail!("{} check(s) failed", validation.errors().len());
    }
    Ok(())
}

pub fn render_validation(validation: &DateValidation) -> String {
    match validation.selection() {
        Some(selection) => format!("valid: {}\n", selection),
        None => validation
            .messages()
            .iter()
            .map(|m| format!("invalid: {}\n", m))
            .collect(),
    }
}
