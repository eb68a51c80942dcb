//! Aggregate root marker for immutable, snapshot-style domain models.

use crate::entity::Entity;

/// Aggregate root marker.
///
/// An aggregate root is the consistency boundary and the unit of persistence: it
/// exclusively owns its value objects and is the only thing a repository stores.
///
/// Aggregates in this workspace are immutable snapshots. Business operations take
/// `&self` and return a new instance (or a `DomainError`), so callers decide when
/// and whether the new state is persisted.
pub trait AggregateRoot: Entity {
    /// Stable type name used in logs and storage diagnostics (e.g. `"catalog.product"`).
    fn aggregate_type() -> &'static str;
}
