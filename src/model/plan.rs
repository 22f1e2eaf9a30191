use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::intervention::Intervention;
use super::resource::{Resource, ResourceKind};

/// A planning document: the resource pool plus every intervention
/// booked against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub resources: Vec<Resource>,
    pub interventions: Vec<Intervention>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            name: "Untitled Plan".to_string(),
            resources: Vec::new(),
            interventions: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Plan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Add an intervention, assigning an identity if it is still a draft.
    /// Returns the identity it ended up with.
    pub fn add_intervention(&mut self, mut iv: Intervention) -> Uuid {
        let id = *iv.id.get_or_insert_with(Uuid::new_v4);
        self.interventions.push(iv);
        id
    }

    pub fn intervention(&self, id: Uuid) -> Option<&Intervention> {
        self.interventions.iter().find(|iv| iv.id == Some(id))
    }

    pub fn intervention_mut(&mut self, id: Uuid) -> Option<&mut Intervention> {
        self.interventions.iter_mut().find(|iv| iv.id == Some(id))
    }

    pub fn remove_intervention(&mut self, id: Uuid) {
        self.interventions.retain(|iv| iv.id != Some(id));
    }

    pub fn resource(&self, id: Uuid) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Remove a resource and detach it from every intervention that
    /// referenced it. The interventions themselves stay.
    pub fn remove_resource(&mut self, id: Uuid) {
        self.resources.retain(|r| r.id != id);
        for iv in &mut self.interventions {
            iv.resources.retain(|&rid| rid != id);
        }
    }

    pub fn resources_of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &Resource> {
        self.resources.iter().filter(move |r| r.kind == kind)
    }

    /// Keep resources grouped by kind so board rows stay in a stable,
    /// predictable order.
    pub fn sort_resources_grouped(&mut self) {
        self.resources.sort_by_key(|r| {
            ResourceKind::ALL
                .iter()
                .position(|k| *k == r.kind)
                .unwrap_or(ResourceKind::ALL.len())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_add_intervention_assigns_identity_to_draft() {
        let mut plan = Plan::new("Test");
        let id = plan.add_intervention(Intervention::draft("Draft"));
        assert_eq!(plan.intervention(id).map(|iv| iv.id), Some(Some(id)));
    }

    #[test]
    fn test_remove_resource_detaches_from_interventions() {
        let mut plan = Plan::new("Test");
        let crane = Resource::new("LTM 1060", ResourceKind::Crane);
        let crane_id = crane.id;
        plan.resources.push(crane);

        let start = NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let end = start + chrono::Duration::hours(4);
        plan.add_intervention(Intervention::new("Lift", start, end).with_resource(crane_id));

        plan.remove_resource(crane_id);
        assert!(plan.resources.is_empty());
        assert!(plan.interventions[0].resources.is_empty());
    }

    #[test]
    fn test_plan_json_round_trip() {
        let mut plan = Plan::new("Round trip");
        plan.resources.push(Resource::new("Truck 1", ResourceKind::Truck));
        let json = serde_json::to_string(&plan).unwrap();
        let back: Plan = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "Round trip");
        assert_eq!(back.resources.len(), 1);
    }
}
