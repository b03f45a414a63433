//! Event containers for marked Hawkes processes.
//!
//! Purpose
//! -------
//! Provide the event triple [`Event`] and a validated, time-ordered sequence
//! [`EventHistory`] used as the input of the likelihood engine and the output
//! of the simulation engine.
//!
//! Key behaviors
//! -------------
//! - [`EventHistory::new`] enforces the history invariants (finite,
//!   non-negative, strictly increasing times and finite marks).
//! - [`EventHistory::from_columns`] builds a history from parallel
//!   time/component/mark columns (the layout used by array-based callers).
//! - [`EventHistory::window`] extracts a contiguous sub-history, which is
//!   valid by construction.
//! - `EventHistory` dereferences to `&[Event]`, the borrowed form consumed
//!   by the engines.
//!
//! Invariants & assumptions
//! ------------------------
//! - Times are strictly increasing; ties are rejected.
//! - Component indices are *not* range-checked here because a history does
//!   not know the size of the process that will score it; the engines check
//!   them against `num_components`.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based with the oldest event at index 0.
//! - Only the simulation engine appends to a history (crate-internal
//!   [`EventHistory::push`]); callers otherwise treat histories as
//!   read-only.
use crate::hawkes::{
    core::validation::validate_events,
    errors::{HawkesError, HawkesResult},
};
use ndarray::Array1;
use std::ops::{Deref, Range};

/// A single marked event `(time, component, mark)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Occurrence time (≥ 0).
    pub time: f64,
    /// Index of the component that fired.
    pub component: usize,
    /// Auxiliary mark (e.g. a magnitude).
    pub mark: f64,
}

impl Event {
    pub const fn new(time: f64, component: usize, mark: f64) -> Self {
        Event { time, component, mark }
    }
}

/// `EventHistory` — validated, strictly time-ordered sequence of events.
///
/// Purpose
/// -------
/// Represent one observed or simulated realisation of a marked point
/// process. Construction validates ordering and finiteness so downstream
/// engines can rely on a sorted history.
///
/// Fields
/// ------
/// - `events`: `Vec<Event>`
///   Events ordered by strictly increasing time.
///
/// Invariants
/// ----------
/// - `events[i].time < events[i + 1].time` for all `i`.
/// - All times are finite and ≥ 0; all marks are finite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventHistory {
    events: Vec<Event>,
}

impl EventHistory {
    /// Validate and wrap an event vector.
    ///
    /// # Errors
    /// - [`HawkesError::NonFiniteEventTime`] / [`HawkesError::NegativeEventTime`]
    ///   for invalid times.
    /// - [`HawkesError::NonFiniteMark`] for NaN/±inf marks.
    /// - [`HawkesError::UnsortedHistory`] if times are not strictly increasing.
    pub fn new(events: Vec<Event>) -> HawkesResult<Self> {
        validate_events(&events)?;
        Ok(EventHistory { events })
    }

    /// Build a history from parallel `times`, `components`, and `marks`
    /// columns.
    ///
    /// # Errors
    /// - [`HawkesError::ColumnLengthMismatch`] if the columns differ in length.
    /// - Any error from [`EventHistory::new`].
    pub fn from_columns(times: &[f64], components: &[usize], marks: &[f64]) -> HawkesResult<Self> {
        if times.len() != components.len() || times.len() != marks.len() {
            return Err(HawkesError::ColumnLengthMismatch {
                times: times.len(),
                components: components.len(),
                marks: marks.len(),
            });
        }
        let events = times
            .iter()
            .zip(components)
            .zip(marks)
            .map(|((&time, &component), &mark)| Event { time, component, mark })
            .collect();
        EventHistory::new(events)
    }

    /// Empty history with room for `capacity` events.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        EventHistory { events: Vec::with_capacity(capacity) }
    }

    /// Append an event strictly after the current last one.
    ///
    /// # Errors
    /// - [`HawkesError::NonIncreasingTime`] if `event.time` does not exceed the
    ///   last time (or is negative / non-finite for the first event).
    pub(crate) fn push(&mut self, event: Event) -> HawkesResult<()> {
        let previous = self.last_time().unwrap_or(0.0);
        let advances = match self.events.last() {
            Some(last) => event.time > last.time,
            None => event.time >= 0.0,
        };
        if !advances || !event.time.is_finite() {
            return Err(HawkesError::NonIncreasingTime { previous, candidate: event.time });
        }
        self.events.push(event);
        Ok(())
    }

    /// Copy of the contiguous sub-history `range` (e.g. `500..1000`).
    ///
    /// # Panics
    /// Panics if `range` is out of bounds, like slice indexing.
    pub fn window(&self, range: Range<usize>) -> EventHistory {
        EventHistory { events: self.events[range].to_vec() }
    }

    /// Borrowed view of the events.
    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    /// Consume the history and return the underlying vector.
    pub fn into_inner(self) -> Vec<Event> {
        self.events
    }

    pub fn first_time(&self) -> Option<f64> {
        self.events.first().map(|e| e.time)
    }

    pub fn last_time(&self) -> Option<f64> {
        self.events.last().map(|e| e.time)
    }

    /// Event times as an owned array.
    pub fn times(&self) -> Array1<f64> {
        self.events.iter().map(|e| e.time).collect()
    }

    /// Component indices as an owned vector.
    pub fn components(&self) -> Vec<usize> {
        self.events.iter().map(|e| e.component).collect()
    }

    /// Event marks as an owned array.
    pub fn marks(&self) -> Array1<f64> {
        self.events.iter().map(|e| e.mark).collect()
    }
}

impl Deref for EventHistory {
    type Target = [Event];

    fn deref(&self) -> &[Event] {
        &self.events
    }
}

impl AsRef<[Event]> for EventHistory {
    fn as_ref(&self) -> &[Event] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `EventHistory::new` / `from_columns` validation.
    // - `window`, column accessors, and the crate-internal `push`.
    //
    // They intentionally DO NOT cover:
    // - Component range checks; those happen in the engines.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `from_columns` zips columns into events and preserves order.
    //
    // Given
    // -----
    // - times [0.5, 1.0, 2.5], components [0, 1, 0], marks [1.0, 2.0, 3.0].
    //
    // Expect
    // ------
    // - A 3-event history whose accessors return the same columns.
    fn from_columns_round_trips_columns() {
        // Arrange
        let times = [0.5, 1.0, 2.5];
        let components = [0, 1, 0];
        let marks = [1.0, 2.0, 3.0];

        // Act
        let history = EventHistory::from_columns(&times, &components, &marks).unwrap();

        // Assert
        assert_eq!(history.len(), 3);
        assert_eq!(history.times(), array![0.5, 1.0, 2.5]);
        assert_eq!(history.components(), vec![0, 1, 0]);
        assert_eq!(history.marks(), array![1.0, 2.0, 3.0]);
        assert_eq!(history[1], Event::new(1.0, 1, 2.0));
        assert_eq!(history.first_time(), Some(0.5));
        assert_eq!(history.last_time(), Some(2.5));
    }

    #[test]
    // Purpose
    // -------
    // Column length mismatches are reported before event validation.
    //
    // Given
    // -----
    // - 2 times, 2 components, 1 mark.
    //
    // Expect
    // ------
    // - `ColumnLengthMismatch { times: 2, components: 2, marks: 1 }`.
    fn from_columns_rejects_mismatched_lengths() {
        let result = EventHistory::from_columns(&[0.0, 1.0], &[0, 0], &[1.0]);
        assert_eq!(
            result,
            Err(HawkesError::ColumnLengthMismatch { times: 2, components: 2, marks: 1 })
        );
    }

    #[test]
    // Purpose
    // -------
    // `new` rejects out-of-order events.
    //
    // Given
    // -----
    // - Times 2.0 then 1.0.
    //
    // Expect
    // ------
    // - `UnsortedHistory { index: 1, previous: 2.0, current: 1.0 }`.
    fn new_rejects_decreasing_times() {
        let result = EventHistory::new(vec![Event::new(2.0, 0, 0.0), Event::new(1.0, 0, 0.0)]);
        assert_eq!(
            result,
            Err(HawkesError::UnsortedHistory { index: 1, previous: 2.0, current: 1.0 })
        );
    }

    #[test]
    // Purpose
    // -------
    // `window` returns the requested contiguous slice as a new history.
    //
    // Given
    // -----
    // - A 4-event history and range 1..3.
    //
    // Expect
    // ------
    // - The two middle events.
    fn window_extracts_contiguous_range() {
        // Arrange
        let history = EventHistory::new(
            (0..4).map(|i| Event::new(i as f64, i % 2, 1.0)).collect(),
        )
        .unwrap();

        // Act
        let sub = history.window(1..3);

        // Assert
        assert_eq!(sub.as_slice(), &history[1..3]);
    }

    #[test]
    // Purpose
    // -------
    // `push` only accepts events that advance the clock.
    //
    // Given
    // -----
    // - An empty history; pushes at 0.0, 1.0, then 1.0 again.
    //
    // Expect
    // ------
    // - The first two succeed; the tie fails with `NonIncreasingTime`.
    fn push_requires_strictly_increasing_times() {
        // Arrange
        let mut history = EventHistory::with_capacity(3);

        // Act & Assert
        assert!(history.push(Event::new(0.0, 0, 1.0)).is_ok());
        assert!(history.push(Event::new(1.0, 0, 1.0)).is_ok());
        assert_eq!(
            history.push(Event::new(1.0, 1, 1.0)),
            Err(HawkesError::NonIncreasingTime { previous: 1.0, candidate: 1.0 })
        );
        assert_eq!(history.len(), 2);
    }
}
