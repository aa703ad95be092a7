//! Prompt lookup for an arbitrary day.

use crate::constants;
use crate::errors::AppResult;
use crate::journal_core::DayKey;
use crate::questions::QuestionResolver;
use std::io::Write;

/// Prints the question for `day`.
pub fn show_question(
    resolver: &QuestionResolver,
    day: DayKey,
    out: &mut impl Write,
) -> AppResult<()> {
    writeln!(
        out,
        "{}",
        day.date().format(constants::HISTORY_DATE_FORMAT)
    )?;
    writeln!(out, "{}", resolver.resolve_question(day))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::QuestionSource;

    #[test]
    fn test_show_question_for_date() {
        let resolver =
            QuestionResolver::new(QuestionSource::Json(r#"{"29-02": "Leap?"}"#.to_string()));
        let mut out = Vec::new();
        show_question(&resolver, DayKey::from_ymd(2024, 2, 29).unwrap(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "February 29, 2024: Thursday\nLeap?\n"
        );
    }
}
