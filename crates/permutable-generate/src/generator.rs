use std::iter::FusedIterator;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use permutable_core::{RangeValues, Result};

use crate::assignment::PartialAssignment;
use crate::schema::RecordSchema;

/// Lazy traversal of every combination of a schema's field ranges.
///
/// Records come out in odometer order: the first declared field varies
/// slowest and the last one fastest. Each call to `next` materializes at most
/// one record. The first error ends the traversal; the iterator is fused.
pub struct Permutations<T> {
    schema: Arc<RecordSchema<T>>,
    frames: Vec<Frame>,
    state: State,
    produced: u64,
}

/// One level of the descent: the live range of field `frames.len() - 1` and
/// the choices made above it.
struct Frame {
    values: RangeValues,
    prefix: PartialAssignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Running,
    Done,
}

impl<T> Permutations<T> {
    pub fn new(schema: Arc<RecordSchema<T>>) -> Self {
        Self {
            schema,
            frames: Vec::new(),
            state: State::Fresh,
            produced: 0,
        }
    }

    pub fn schema(&self) -> &Arc<RecordSchema<T>> {
        &self.schema
    }

    /// Records successfully yielded so far.
    pub fn produced(&self) -> u64 {
        self.produced
    }

    fn start(&mut self) -> Option<Result<T>> {
        self.state = State::Running;
        debug!(
            schema = %self.schema.name(),
            fields = self.schema.fields().len(),
            expected = ?self.schema.expected_count(),
            "permutation traversal started"
        );

        match self.schema.fields().first() {
            Some(field) => {
                self.frames.push(Frame {
                    values: field.range().get_range(),
                    prefix: PartialAssignment::new(),
                });
                None
            }
            None => {
                let record = self.materialize(&PartialAssignment::new());
                self.finish();
                Some(record)
            }
        }
    }

    fn materialize(&mut self, assignment: &PartialAssignment) -> Result<T> {
        let record = self.schema.materialize(assignment);
        match &record {
            Ok(_) => {
                self.produced += 1;
                trace!(
                    schema = %self.schema.name(),
                    index = self.produced - 1,
                    "record materialized"
                );
            }
            Err(err) => {
                warn!(
                    schema = %self.schema.name(),
                    produced = self.produced,
                    error = %err,
                    "permutation traversal aborted"
                );
                self.frames.clear();
                self.state = State::Done;
            }
        }
        record
    }

    fn finish(&mut self) {
        if self.state != State::Done {
            self.state = State::Done;
            debug!(
                schema = %self.schema.name(),
                produced = self.produced,
                "permutation traversal finished"
            );
        }
    }
}

impl<T> Iterator for Permutations<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Done => return None,
            State::Fresh => {
                if let Some(record) = self.start() {
                    return Some(record);
                }
            }
            State::Running => {}
        }

        let depth_total = self.schema.fields().len();
        loop {
            let Some(depth) = self.frames.len().checked_sub(1) else {
                self.finish();
                return None;
            };

            let frame = &mut self.frames[depth];
            let Some(value) = frame.values.next() else {
                self.frames.pop();
                continue;
            };
            let assignment = frame.prefix.extend(depth, value);

            if depth + 1 == depth_total {
                return Some(self.materialize(&assignment));
            }

            let values = self.schema.fields()[depth + 1].range().get_range();
            self.frames.push(Frame {
                values,
                prefix: assignment,
            });
        }
    }
}

impl<T> FusedIterator for Permutations<T> {}
