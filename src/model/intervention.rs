use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of an intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterventionStatus {
    Planned,
    Confirmed,
    Done,
    Canceled,
}

impl InterventionStatus {
    pub const ALL: [InterventionStatus; 4] = [
        InterventionStatus::Planned,
        InterventionStatus::Confirmed,
        InterventionStatus::Done,
        InterventionStatus::Canceled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InterventionStatus::Planned => "Planned",
            InterventionStatus::Confirmed => "Confirmed",
            InterventionStatus::Done => "Done",
            InterventionStatus::Canceled => "Canceled",
        }
    }
}

/// A time-bound reservation occupying one or more resources.
///
/// `end` is exclusive. Either endpoint may be missing while the user is
/// still editing; such interventions are kept in the plan but excluded
/// from board layout and conflict checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intervention {
    /// Stable identity. `None` for a draft that has not been added to a
    /// plan yet.
    pub id: Option<Uuid>,
    pub title: String,
    pub client: String,
    pub status: InterventionStatus,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    /// Identities of the resources this intervention occupies.
    pub resources: Vec<Uuid>,
    pub notes: String,
}

impl Intervention {
    /// Create an intervention with an assigned identity.
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: Some(Uuid::new_v4()),
            title: title.into(),
            client: String::new(),
            status: InterventionStatus::Planned,
            start: Some(start),
            end: Some(end),
            resources: Vec::new(),
            notes: String::new(),
        }
    }

    /// Create an unsaved draft with no identity and no dates.
    pub fn draft(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            client: String::new(),
            status: InterventionStatus::Planned,
            start: None,
            end: None,
            resources: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = client.into();
        self
    }

    pub fn with_status(mut self, status: InterventionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_resource(mut self, resource: Uuid) -> Self {
        if !self.resources.contains(&resource) {
            self.resources.push(resource);
        }
        self
    }

    /// The well-formed time range, if any. `None` when an endpoint is
    /// missing or the range is empty or reversed.
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match (self.start, self.end) {
            (Some(s), Some(e)) if e > s => Some((s, e)),
            _ => None,
        }
    }

    pub fn uses_resource(&self, resource: Uuid) -> bool {
        self.resources.contains(&resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_span_requires_positive_duration() {
        let iv = Intervention::new("Lift", at(2, 9), at(2, 11));
        assert!(iv.span().is_some());

        let zero = Intervention::new("Zero", at(2, 9), at(2, 9));
        assert!(zero.span().is_none());

        let reversed = Intervention::new("Rev", at(2, 11), at(2, 9));
        assert!(reversed.span().is_none());
    }

    #[test]
    fn test_draft_has_no_identity_and_no_span() {
        let d = Intervention::draft("Pending quote");
        assert!(d.id.is_none());
        assert!(d.span().is_none());
    }

    #[test]
    fn test_with_resource_dedups() {
        let r = Uuid::new_v4();
        let iv = Intervention::new("Lift", at(2, 9), at(2, 11))
            .with_resource(r)
            .with_resource(r);
        assert_eq!(iv.resources.len(), 1);
        assert!(iv.uses_resource(r));
    }
}
