//! Integration tests for fan-out

use std::collections::BTreeSet;

use wayfarer_engine::{Delivery, DeliveryError, DeliverySink, fan_out};
use wayfarer_foundation::EntityId;

/// Accepts lines for listed recipients and refuses the rest.
struct Sessions {
    open: BTreeSet<EntityId>,
    received: Vec<Delivery>,
}

impl DeliverySink for Sessions {
    fn deliver(&mut self, recipient: EntityId, text: &str) -> Result<(), DeliveryError> {
        if !self.open.contains(&recipient) {
            return Err(DeliveryError::Disconnected(recipient));
        }
        self.received.push(Delivery::new(recipient, text));
        Ok(())
    }
}

#[test]
fn one_failure_does_not_stop_the_rest() {
    let (ann, ben, cy) = (EntityId::new(1, 1), EntityId::new(2, 1), EntityId::new(3, 1));
    let mut sessions = Sessions {
        open: [ann, cy].into_iter().collect(),
        received: Vec::new(),
    };
    let lines = vec![
        Delivery::new(ann, "first"),
        Delivery::new(ben, "second"),
        Delivery::new(cy, "third"),
    ];

    let report = fan_out(&mut sessions, &lines);

    assert_eq!(report.delivered, 2);
    assert_eq!(report.failed, vec![DeliveryError::Disconnected(ben)]);
    assert!(!report.is_complete());
    assert_eq!(
        sessions.received,
        vec![Delivery::new(ann, "first"), Delivery::new(cy, "third")]
    );
}

#[test]
fn vectors_collect_everything_in_order() {
    let ann = EntityId::new(1, 1);
    let lines = vec![Delivery::new(ann, "a"), Delivery::new(ann, "b")];
    let mut collected: Vec<Delivery> = Vec::new();

    let report = fan_out(&mut collected, &lines);

    assert!(report.is_complete());
    assert_eq!(collected, lines);
}

#[test]
fn rejections_name_the_recipient() {
    let err = DeliveryError::Rejected {
        recipient: EntityId::new(4, 1),
        reason: "socket closed".to_string(),
    };
    assert_eq!(err.to_string(), "delivery to #4 failed: socket closed");
}
