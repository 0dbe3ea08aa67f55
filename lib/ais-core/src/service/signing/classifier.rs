use thiserror::Error;

use crate::model::outcome::{OutcomeKind, is_success_major};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("result major is missing")]
pub struct MissingResultMajor;

/// Maps a service result to an [`OutcomeKind`].
///
/// Total over every non-empty major: unknown minors under a failing major are
/// [`OutcomeKind::SubsystemError`]. Minors are compared by their trailing path,
/// case-insensitively, with `.` and `/` treated alike.
pub fn classify(
    major: &str,
    minor: Option<&str>,
    message: Option<&str>,
) -> Result<OutcomeKind, MissingResultMajor> {
    let major = major.trim();
    if major.is_empty() {
        return Err(MissingResultMajor);
    }
    if is_success_major(major) {
        return Ok(OutcomeKind::Success);
    }

    let minor = minor.unwrap_or_default().replace('.', "/").to_ascii_lowercase();
    let message = message.unwrap_or_default().to_ascii_lowercase();
    let minor_is = |suffix: &str| minor == suffix || minor.ends_with(&format!("/{suffix}"));

    let kind = if minor_is("stepup/timeout") {
        OutcomeKind::UserTimeout
    } else if minor_is("stepup/cancel") {
        OutcomeKind::UserCancel
    } else if minor_is("stepup/serialnumbermismatch") {
        OutcomeKind::SerialNumberMismatch
    } else if minor_is("stepup/insufficientdatawithabsentmsisdn")
        || (minor_is("insufficientdata") && message.contains("msisdn"))
    {
        OutcomeKind::InsufficientDataWithAbsentMsisdn
    } else if minor_is("stepup/service")
        && (message.contains("invalidpassword") || message.contains("invalidotp"))
    {
        OutcomeKind::UserAuthenticationFailed
    } else {
        OutcomeKind::SubsystemError
    };

    Ok(kind)
}
