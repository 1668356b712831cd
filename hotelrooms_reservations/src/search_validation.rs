use chrono::NaiveDate;

#[derive(Debug, Clone, thiserror::Error, Eq, PartialEq)]
pub enum ValidationError {
    #[error("past date")]
    PastDate,

    #[error("equal dates")]
    EqualDates,

    #[error("start after end")]
    StartAfterEnd,

    #[error("incomplete selection")]
    IncompleteSelection,

    #[error("no client selected")]
    MissingClient,
}

/// Checks a room search before rooms are fetched, first failing rule wins:
/// past dates, equal dates, inverted range, then missing fields.
/// Date rules only look at the dates that are present.
pub fn validate_search(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    client_id: Option<&str>,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if start.is_some_and(|start| start < today) || end.is_some_and(|end| end < today) {
        return Err(ValidationError::PastDate);
    }

    if let (Some(start), Some(end)) = (start, end) {
        if start == end {
            return Err(ValidationError::EqualDates);
        }
        if start > end {
            return Err(ValidationError::StartAfterEnd);
        }
    }

    match (start, end, client_id) {
        (Some(_), Some(_), Some(client_id)) if !client_id.is_empty() => Ok(()),
        _ => Err(ValidationError::IncompleteSelection),
    }
}
