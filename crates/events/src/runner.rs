//! Projection runner utilities (read model builders).
//!
//! Read models are **disposable**; events are the source of truth.
//! This module provides deterministic replay and cursor tracking without
//! making storage assumptions.

use crate::{EventEnvelope, Projection};

/// Tracks projection progress through a feed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProjectionCursor {
    last_sequence_number: u64,
}

impl ProjectionCursor {
    pub fn last_sequence_number(&self) -> u64 {
        self.last_sequence_number
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// The feed handed the runner an envelope at or before the cursor.
    NonMonotonicSequence { last: u64, found: u64 },
}

/// Runs envelopes through a projection and tracks progress.
#[derive(Debug)]
pub struct ProjectionRunner<P>
where
    P: Projection,
{
    projection: P,
    cursor: Option<ProjectionCursor>,
}

impl<P> ProjectionRunner<P>
where
    P: Projection,
{
    pub fn new(projection: P) -> Self {
        Self {
            projection,
            cursor: None,
        }
    }

    pub fn projection(&self) -> &P {
        &self.projection
    }

    pub fn projection_mut(&mut self) -> &mut P {
        &mut self.projection
    }

    pub fn into_projection(self) -> P {
        self.projection
    }

    /// Current cursor for this projection (if any envelopes were applied).
    pub fn cursor(&self) -> Option<ProjectionCursor> {
        self.cursor
    }

    /// Apply a single envelope, enforcing monotonic sequencing.
    pub fn apply(&mut self, envelope: &EventEnvelope<P::Ev>) -> Result<(), ProjectionError> {
        let found_seq = envelope.sequence_number();

        match self.cursor {
            None => {
                self.projection.apply(envelope);
                self.cursor = Some(ProjectionCursor {
                    last_sequence_number: found_seq,
                });
                Ok(())
            }
            Some(mut c) => {
                if found_seq <= c.last_sequence_number {
                    tracing::warn!(
                        last = c.last_sequence_number,
                        found = found_seq,
                        "rejecting replayed or out-of-order envelope"
                    );
                    return Err(ProjectionError::NonMonotonicSequence {
                        last: c.last_sequence_number,
                        found: found_seq,
                    });
                }

                self.projection.apply(envelope);
                c.last_sequence_number = found_seq;
                self.cursor = Some(c);
                Ok(())
            }
        }
    }

    /// Apply many envelopes in order.
    pub fn run<'a>(
        &mut self,
        envelopes: impl IntoIterator<Item = &'a EventEnvelope<P::Ev>>,
    ) -> Result<(), ProjectionError>
    where
        P::Ev: 'a,
    {
        for env in envelopes {
            self.apply(env)?;
        }
        Ok(())
    }

    /// Rebuild a projection from scratch by replaying the full event history.
    ///
    /// The factory is used to create a fresh projection instance.
    pub fn rebuild_from_scratch<'a>(
        factory: impl FnOnce() -> P,
        envelopes: impl IntoIterator<Item = &'a EventEnvelope<P::Ev>>,
    ) -> Result<(P, Option<ProjectionCursor>), ProjectionError>
    where
        P::Ev: 'a,
    {
        let mut runner = ProjectionRunner::new(factory());
        runner.run(envelopes)?;
        Ok((runner.projection, runner.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Event;
    use billkit_core::AggregateId;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    #[derive(Debug, Clone)]
    struct Bumped {
        at: DateTime<Utc>,
    }

    impl Event for Bumped {
        fn event_type(&self) -> &'static str {
            "test.counter.bumped"
        }

        fn version(&self) -> u32 {
            1
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.at
        }
    }

    #[derive(Debug, Default)]
    struct Counter {
        seen: u64,
    }

    impl Projection for Counter {
        type Ev = Bumped;

        fn apply(&mut self, _envelope: &EventEnvelope<Bumped>) {
            self.seen += 1;
        }
    }

    fn envelope(seq: u64) -> EventEnvelope<Bumped> {
        EventEnvelope::new(
            Uuid::now_v7(),
            AggregateId::new(),
            "counter",
            seq,
            Bumped { at: Utc::now() },
        )
    }

    #[test]
    fn applies_in_order_and_tracks_cursor() {
        let mut runner = ProjectionRunner::new(Counter::default());
        runner.run([&envelope(1), &envelope(2), &envelope(3)]).unwrap();

        assert_eq!(runner.projection().seen, 3);
        assert_eq!(runner.cursor().unwrap().last_sequence_number(), 3);
    }

    #[test]
    fn rejects_replayed_envelope() {
        let mut runner = ProjectionRunner::new(Counter::default());
        runner.apply(&envelope(5)).unwrap();

        let err = runner.apply(&envelope(5)).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::NonMonotonicSequence { last: 5, found: 5 }
        );
        // The projection itself must not have observed the duplicate.
        assert_eq!(runner.projection().seen, 1);
    }

    #[test]
    fn rebuild_replays_full_history() {
        let history = vec![envelope(1), envelope(2)];
        let (counter, cursor) =
            ProjectionRunner::rebuild_from_scratch(Counter::default, &history).unwrap();

        assert_eq!(counter.seen, 2);
        assert_eq!(cursor.unwrap().last_sequence_number(), 2);
    }
}
