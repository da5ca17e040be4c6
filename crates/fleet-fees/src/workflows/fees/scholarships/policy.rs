use super::ScholarshipAward;

/// Picks the award with the strictly greatest amount. Awards arrive in evaluation
/// order, so an equal amount later in the list never displaces an earlier one.
pub(crate) fn recommend(awards: &[ScholarshipAward]) -> Option<&ScholarshipAward> {
    let mut awards = awards.iter();
    let first = awards.next()?;
    Some(awards.fold(first, |best, current| {
        if current.amount > best.amount {
            current
        } else {
            best
        }
    }))
}
