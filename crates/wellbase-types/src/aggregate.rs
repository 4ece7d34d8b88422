use crate::stage::BucketResult;
use serde::{Serialize, Serializer};

/// Result of folding a subtree into stage buckets.
///
/// Serializes as `null`, a bucket object, or an array respectively.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregate {
    /// Nothing below this node produced rows.
    Empty,
    /// A terminal group: a directory of stage-suffixed CSV files.
    Group(BucketResult),
    /// Non-empty results of child directories, in child order.
    Forest(Vec<Aggregate>),
}

impl Aggregate {
    pub fn is_empty(&self) -> bool {
        matches!(self, Aggregate::Empty)
    }

    /// Caller-facing shape: a forest holding exactly one result is replaced
    /// by that result.
    pub fn normalize(self) -> Aggregate {
        match self {
            Aggregate::Forest(mut items) if items.len() == 1 => items.remove(0),
            other => other,
        }
    }

    /// All groups in this result, depth-first.
    pub fn groups(&self) -> Vec<&BucketResult> {
        let mut out = Vec::new();
        self.collect_groups(&mut out);
        out
    }

    fn collect_groups<'a>(&'a self, out: &mut Vec<&'a BucketResult>) {
        match self {
            Aggregate::Empty => {}
            Aggregate::Group(buckets) => out.push(buckets),
            Aggregate::Forest(items) => {
                for item in items {
                    item.collect_groups(out);
                }
            }
        }
    }
}

impl Serialize for Aggregate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Aggregate::Empty => serializer.serialize_none(),
            Aggregate::Group(buckets) => buckets.serialize(serializer),
            Aggregate::Forest(items) => items.serialize(serializer),
        }
    }
}
