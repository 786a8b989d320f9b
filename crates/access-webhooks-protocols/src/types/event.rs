//! Webhook event names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A webhook event name.
///
/// The six named variants form the catalog an operator may select from.
/// Names outside the catalog are kept verbatim in [`EventType::Other`] so a
/// record reported by the registry survives display and edit untouched.
///
/// Ordering follows the catalog, with unknown names sorted after it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    DoorbellIncoming,
    DoorbellCompleted,
    DoorbellIncomingRen,
    DeviceDpsStatus,
    DoorUnlock,
    DeviceEmergencyStatus,
    Other(String),
}

/// Events an operator may select, in display order.
pub static EVENT_CATALOG: [EventType; 6] = [
    EventType::DoorbellIncoming,
    EventType::DoorbellCompleted,
    EventType::DoorbellIncomingRen,
    EventType::DeviceDpsStatus,
    EventType::DoorUnlock,
    EventType::DeviceEmergencyStatus,
];

impl EventType {
    /// Wire name of the event.
    pub fn as_str(&self) -> &str {
        match self {
            Self::DoorbellIncoming => "access.doorbell.incoming",
            Self::DoorbellCompleted => "access.doorbell.completed",
            Self::DoorbellIncomingRen => "access.doorbell.incoming.REN",
            Self::DeviceDpsStatus => "access.device.dps_status",
            Self::DoorUnlock => "access.door.unlock",
            Self::DeviceEmergencyStatus => "access.device.emergency_status",
            Self::Other(name) => name,
        }
    }

    /// Whether the event belongs to the selectable catalog.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// The selectable catalog.
    pub fn catalog() -> &'static [EventType] {
        &EVENT_CATALOG
    }

    /// Short operator-facing description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::DoorbellIncoming => "Doorbell rang",
            Self::DoorbellCompleted => "Doorbell call ended",
            Self::DoorbellIncomingRen => "Doorbell rang (remote notification)",
            Self::DeviceDpsStatus => "Door position sensor changed",
            Self::DoorUnlock => "Door unlocked",
            Self::DeviceEmergencyStatus => "Emergency status changed",
            Self::Other(_) => "Not supported by this client",
        }
    }
}

impl From<&str> for EventType {
    fn from(name: &str) -> Self {
        EVENT_CATALOG
            .iter()
            .find(|event| event.as_str() == name)
            .cloned()
            .unwrap_or_else(|| Self::Other(name.to_string()))
    }
}

impl From<String> for EventType {
    fn from(name: String) -> Self {
        match Self::from(name.as_str()) {
            Self::Other(_) => Self::Other(name),
            known => known,
        }
    }
}

impl From<EventType> for String {
    fn from(event: EventType) -> Self {
        match event {
            EventType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
