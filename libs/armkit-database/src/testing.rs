//! Call-recording store stub for tests.
//!
//! Every call is captured with its arguments. `query` answers come from a FIFO of
//! scripted responses; once the script runs dry an empty page is returned.

use std::collections::VecDeque;

use armkit_resource_id::ResourceId;
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::client::{DatabaseClient, DatabaseError};
use crate::object::{Object, ObjectQueryResult};
use crate::query::{Query, QueryOptions};

/// A captured call.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Query { query: Query, options: QueryOptions },
    Get(String),
    Save(Object),
    Delete(String),
}

#[derive(Default)]
pub struct RecordingDatabaseClient {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<Result<ObjectQueryResult, DatabaseError>>>,
}

impl RecordingDatabaseClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next `query` call.
    #[must_use]
    pub fn with_response(self, response: Result<ObjectQueryResult, DatabaseError>) -> Self {
        self.push_response(response);
        self
    }

    pub fn push_response(&self, response: Result<ObjectQueryResult, DatabaseError>) {
        self.responses.lock().push_back(response);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Arguments of every `query` call, in order.
    #[must_use]
    pub fn queries(&self) -> Vec<(Query, QueryOptions)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                RecordedCall::Query { query, options } => Some((query.clone(), options.clone())),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries().len()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl DatabaseClient for RecordingDatabaseClient {
    async fn query(
        &self,
        query: &Query,
        options: &QueryOptions,
    ) -> Result<ObjectQueryResult, DatabaseError> {
        self.record(RecordedCall::Query {
            query: query.clone(),
            options: options.clone(),
        });
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(ObjectQueryResult::default()))
    }

    async fn get(&self, id: &ResourceId) -> Result<Object, DatabaseError> {
        self.record(RecordedCall::Get(id.to_string()));
        Err(DatabaseError::NotFound(id.to_string()))
    }

    async fn save(&self, object: Object) -> Result<Object, DatabaseError> {
        self.record(RecordedCall::Save(object.clone()));
        Ok(object)
    }

    async fn delete(&self, id: &ResourceId) -> Result<(), DatabaseError> {
        self.record(RecordedCall::Delete(id.to_string()));
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_arguments_and_replays_script() {
        let stub = RecordingDatabaseClient::new()
            .with_response(Err(DatabaseError::Backend("down".to_owned())));
        let q = Query::new("/planes/radius/local", "Applications.Core/containers");
        let opts = QueryOptions::new().with_max_query_item_count(Some(5));

        assert!(stub.query(&q, &opts).await.is_err());
        let second = stub.query(&q, &QueryOptions::new()).await.unwrap();
        assert!(second.items.is_empty());

        assert_eq!(stub.query_count(), 2);
        assert_eq!(stub.queries()[0], (q, opts));
    }
}
