//! Conflict detection between interventions.
//!
//! Two interventions conflict when they share at least one resource and
//! their half-open time ranges overlap. Detection is a pure query; the
//! caller decides whether to block, warn, or allow.

use crate::model::Intervention;

/// All interventions in `existing` that collide with `candidate`.
///
/// A candidate with a missing endpoint cannot be evaluated and yields no
/// conflicts; the same permissive rule applies to any existing intervention
/// still missing an endpoint. When the candidate carries an identity, the
/// existing intervention with that identity is skipped so an in-place edit
/// never conflicts with its own stored state.
pub fn find_conflicts<'a>(
    candidate: &Intervention,
    existing: &'a [Intervention],
) -> Vec<&'a Intervention> {
    let (Some(start), Some(end)) = (candidate.start, candidate.end) else {
        return Vec::new();
    };

    existing
        .iter()
        .filter(|other| {
            if candidate.id.is_some() && other.id == candidate.id {
                return false;
            }
            let (Some(other_start), Some(other_end)) = (other.start, other.end) else {
                return false;
            };
            // Half-open overlap: an intervention ending exactly when
            // another starts does not collide.
            start < other_end
                && end > other_start
                && candidate.resources.iter().any(|r| other.resources.contains(r))
        })
        .collect()
}

/// Whether `candidate` collides with anything in `existing`.
pub fn has_conflict(candidate: &Intervention, existing: &[Intervention]) -> bool {
    !find_conflicts(candidate, existing).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use uuid::Uuid;

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn booking(start: NaiveDateTime, end: NaiveDateTime, resource: Uuid) -> Intervention {
        Intervention::new("Booking", start, end).with_resource(resource)
    }

    #[test]
    fn test_overlap_on_shared_resource_conflicts() {
        let crane = Uuid::new_v4();
        let existing = vec![booking(at(9, 0), at(11, 0), crane)];
        let candidate = booking(at(10, 0), at(12, 0), crane);
        assert!(has_conflict(&candidate, &existing));
    }

    #[test]
    fn test_overlap_on_different_resources_is_fine() {
        let existing = vec![booking(at(9, 0), at(11, 0), Uuid::new_v4())];
        let candidate = booking(at(10, 0), at(12, 0), Uuid::new_v4());
        assert!(!has_conflict(&candidate, &existing));
    }

    #[test]
    fn test_touching_ranges_do_not_conflict() {
        let crane = Uuid::new_v4();
        let existing = vec![booking(at(9, 0), at(11, 0), crane)];
        let candidate = booking(at(11, 0), at(13, 0), crane);
        assert!(!has_conflict(&candidate, &existing));
    }

    #[test]
    fn test_missing_endpoint_yields_no_conflict() {
        let crane = Uuid::new_v4();
        let existing = vec![booking(at(9, 0), at(11, 0), crane)];
        let mut candidate = booking(at(10, 0), at(12, 0), crane);
        candidate.end = None;
        assert!(!has_conflict(&candidate, &existing));
    }

    #[test]
    fn test_candidate_excluded_against_itself() {
        let crane = Uuid::new_v4();
        let stored = booking(at(9, 0), at(11, 0), crane);
        let existing = vec![stored.clone()];

        // Same identity, shifted dates: an update of the stored booking.
        let mut edited = stored;
        edited.start = Some(at(9, 30));
        edited.end = Some(at(11, 30));
        assert!(!has_conflict(&edited, &existing));
    }

    #[test]
    fn test_draft_without_identity_is_compared_normally() {
        let crane = Uuid::new_v4();
        let existing = vec![booking(at(9, 0), at(11, 0), crane)];
        let mut draft = Intervention::draft("Draft");
        draft.start = Some(at(10, 0));
        draft.end = Some(at(12, 0));
        draft.resources.push(crane);
        assert!(has_conflict(&draft, &existing));
    }

    #[test]
    fn test_conflict_is_symmetric() {
        let crane = Uuid::new_v4();
        let a = booking(at(9, 0), at(11, 0), crane);
        let b = booking(at(10, 0), at(12, 0), crane);
        assert!(has_conflict(&a, std::slice::from_ref(&b)));
        assert!(has_conflict(&b, std::slice::from_ref(&a)));
    }

    #[test]
    fn test_empty_existing_is_safe() {
        let candidate = booking(at(9, 0), at(11, 0), Uuid::new_v4());
        assert!(!has_conflict(&candidate, &[]));
    }

    #[test]
    fn test_find_conflicts_lists_every_collision() {
        let crane = Uuid::new_v4();
        let truck = Uuid::new_v4();
        let existing = vec![
            booking(at(9, 0), at(10, 0), crane),
            booking(at(9, 30), at(11, 0), truck),
            booking(at(13, 0), at(14, 0), crane),
        ];
        let candidate = Intervention::new("Big job", at(9, 0), at(12, 0))
            .with_resource(crane)
            .with_resource(truck);
        assert_eq!(find_conflicts(&candidate, &existing).len(), 2);
    }
}
