use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of rentable resource, used for grouping rows on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Crane,
    Truck,
    Driver,
    Crew,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Crane,
        ResourceKind::Truck,
        ResourceKind::Driver,
        ResourceKind::Crew,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Crane => "Cranes",
            ResourceKind::Truck => "Trucks",
            ResourceKind::Driver => "Drivers",
            ResourceKind::Crew => "Crews",
        }
    }
}

/// A bookable resource: a machine, a vehicle, or a person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: Uuid,
    pub name: String,
    pub kind: ResourceKind,
}

impl Resource {
    pub fn new(name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
        }
    }
}
