use serde::{Deserialize, Serialize};

use taproom_core::{DomainError, DomainResult};

/// Beer order lifecycle.
///
/// The forward path is NEW → READY → PICKED_UP → DELIVERED. CANCELLED is
/// reachable from any non-terminal state. DELIVERED and CANCELLED are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    Ready,
    PickedUp,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        Self::New,
        Self::Ready,
        Self::PickedUp,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether `next` is a legal transition from this status.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        match (self, next) {
            (Self::New, Self::Ready)
            | (Self::Ready, Self::PickedUp)
            | (Self::PickedUp, Self::Delivered) => true,
            (from, Self::Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    pub fn check_transition_to(self, next: OrderStatus) -> DomainResult<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(DomainError::invariant(format!(
                "cannot transition from {self} to {next}"
            )))
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Ready => "READY",
            Self::PickedUp => "PICKED_UP",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(Self::New),
            "READY" => Ok(Self::Ready),
            "PICKED_UP" => Ok(Self::PickedUp),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::validation_one(format!(
                "Invalid order status: {s}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_path_is_legal() {
        assert!(OrderStatus::New.can_transition_to(OrderStatus::Ready));
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::PickedUp));
        assert!(OrderStatus::PickedUp.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn cancel_is_legal_from_every_non_terminal_status() {
        assert!(OrderStatus::New.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::PickedUp.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn skipping_ahead_is_illegal() {
        assert!(!OrderStatus::New.can_transition_to(OrderStatus::PickedUp));
        assert!(!OrderStatus::New.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn moving_backwards_is_illegal() {
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::New));
        assert!(!OrderStatus::PickedUp.can_transition_to(OrderStatus::Ready));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::PickedUp));
    }

    #[test]
    fn check_transition_names_both_states() {
        let err = OrderStatus::New
            .check_transition_to(OrderStatus::Delivered)
            .unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) => {
                assert_eq!(msg, "cannot transition from NEW to DELIVERED");
            }
            _ => panic!("Expected InvariantViolation"),
        }
    }

    #[test]
    fn from_str_round_trips_every_status() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn from_str_rejects_unknown_values() {
        let err = "BREWING".parse::<OrderStatus>().unwrap_err();
        match err {
            DomainError::Validation(violations) => {
                assert_eq!(violations, vec!["Invalid order status: BREWING".to_string()]);
            }
            _ => panic!("Expected Validation error"),
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_status() -> impl Strategy<Value = OrderStatus> {
            (0usize..OrderStatus::ALL.len()).prop_map(|i| OrderStatus::ALL[i])
        }

        proptest! {
            /// Terminal states accept no transition at all.
            #[test]
            fn terminal_states_accept_nothing(next in any_status()) {
                prop_assert!(!OrderStatus::Delivered.can_transition_to(next));
                prop_assert!(!OrderStatus::Cancelled.can_transition_to(next));
            }

            /// A status never transitions to itself.
            #[test]
            fn self_transitions_are_illegal(status in any_status()) {
                prop_assert!(!status.can_transition_to(status));
            }

            /// Any legal transition starts from a non-terminal state.
            #[test]
            fn legal_transitions_start_non_terminal(from in any_status(), to in any_status()) {
                if from.can_transition_to(to) {
                    prop_assert!(!from.is_terminal());
                }
            }
        }
    }
}
