//! Response composition — the fixed disclaimer footer and the trailing
//! survey-status annotation.

use lectern_core::survey::SurveyOutcome;

/// Append the disclaimer footer. Unconditional and identical across modes.
pub fn with_disclaimer(text: &str, syllabus_link: &str) -> String {
    format!(
        "{text}\n\nThere may be errors in my responses; always refer to the course web page: {syllabus_link}"
    )
}

/// Append the survey outcome as an HTML-style trailing comment. Diagnostic
/// only — never part of the semantic answer.
pub fn with_survey_comment(text: &str, outcome: &SurveyOutcome) -> String {
    format!("{text}\n<!-- {outcome} -->")
}
