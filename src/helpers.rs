use std::fmt::{Display, Formatter};

/// Write a list of choices as `a, b, c or d`.
pub fn display_choices(f: &mut Formatter, v: &[&str]) -> Result<(), std::fmt::Error> {
    for (i, choice) in v.iter().enumerate() {
        write!(f, "{choice}")?;
        if i + 2 == v.len() {
            write!(f, " or ")?;
        } else if i + 1 < v.len() {
            write!(f, ", ")?;
        }
    }
    Ok(())
}

/// The Choices struct exists to hook into the Display logic of printing to a string
struct Choices<'a>(&'a [&'a str]);

impl Display for Choices<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        display_choices(f, self.0)
    }
}

pub fn stringify_choices(v: &[&str]) -> String {
    format!("{}", Choices(v))
}
