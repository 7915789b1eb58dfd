//! The AI advisory subsystem, treated as an opaque black box: it may be
//! consulted pre- or post-solve for soft suggestions, but its output never
//! affects the constraint model or correctness.

use crate::config::{Suggestion, SolveResponse};

pub trait SuggestionAdvisor {
    fn suggest(&self, response: &SolveResponse) -> Vec<Suggestion>;
}

/// The default advisor: no suggestions, no network calls, no opinions.
pub struct NoopAdvisor;

impl SuggestionAdvisor for NoopAdvisor {
    fn suggest(&self, _response: &SolveResponse) -> Vec<Suggestion> {
        Vec::new()
    }
}

/// A fixed, category-labelled suggestion set that does not actually
/// inspect the solved schedule. This is the documented boundary of what
/// the advisor is allowed to influence: suggestions never feed back into
/// the constraint model.
pub struct StaticAdvisor;

impl SuggestionAdvisor for StaticAdvisor {
    fn suggest(&self, _response: &SolveResponse) -> Vec<Suggestion> {
        vec![
            Suggestion {
                kind: "optimization".to_string(),
                priority: "high".to_string(),
                description:
                    "Consider moving high-capacity subjects to larger classrooms during peak hours"
                        .to_string(),
                implementation: "Swap classroom assignments for subjects with large enrolled batches"
                    .to_string(),
            },
            Suggestion {
                kind: "workload_balance".to_string(),
                priority: "medium".to_string(),
                description: "Distribute faculty workload more evenly across days".to_string(),
                implementation: "Move some classes from overloaded days to lighter days".to_string(),
            },
            Suggestion {
                kind: "conflict_resolution".to_string(),
                priority: "high".to_string(),
                description: "Resolve scheduling conflicts by adjusting time slots".to_string(),
                implementation: "Move conflicting classes to available adjacent time slots"
                    .to_string(),
            },
        ]
    }
}
