use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::events::core::{DomainEvent, EventEnvelope};
use super::{EventSink, OutboxError};

/// Serialized outbox row, as a relay would read it
#[derive(Debug, Clone)]
pub struct OutboxMessage {
    pub id: Uuid,
    pub aggregate_id: Uuid,
    pub event_id: Uuid,
    pub event_type: String,
    pub sequence_number: i64,
    pub correlation_id: Uuid,
    pub causation_id: Option<Uuid>,
    pub payload: String,
    pub created_at: DateTime<Utc>,
}

/// Keeps outbox messages in memory, in append order
#[derive(Debug, Default)]
pub struct InMemoryOutbox {
    messages: Mutex<Vec<OutboxMessage>>,
}

impl InMemoryOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn messages(&self) -> Vec<OutboxMessage> {
        self.messages.lock().await.clone()
    }

    pub async fn messages_for(&self, aggregate_id: Uuid) -> Vec<OutboxMessage> {
        self.messages
            .lock()
            .await
            .iter()
            .filter(|m| m.aggregate_id == aggregate_id)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.messages.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.lock().await.is_empty()
    }

    /// Hands pending messages to a relay and clears them
    pub async fn drain(&self) -> Vec<OutboxMessage> {
        std::mem::take(&mut *self.messages.lock().await)
    }
}

#[async_trait]
impl<E: DomainEvent + 'static> EventSink<E> for InMemoryOutbox {
    async fn append(&self, events: Vec<EventEnvelope<E>>) -> Result<(), OutboxError> {
        // serialize everything before touching the buffer so a failure appends nothing
        let mut rows = Vec::with_capacity(events.len());
        for envelope in &events {
            let payload = serde_json::to_string(&envelope.event_data).map_err(|source| {
                OutboxError::Serialization {
                    event_type: envelope.event_type.clone(),
                    source,
                }
            })?;

            rows.push(OutboxMessage {
                id: Uuid::new_v4(),
                aggregate_id: envelope.aggregate_id,
                event_id: envelope.event_id,
                event_type: envelope.event_type.clone(),
                sequence_number: envelope.sequence_number,
                correlation_id: envelope.correlation_id,
                causation_id: envelope.causation_id,
                payload,
                created_at: Utc::now(),
            });
        }

        let count = rows.len();
        self.messages.lock().await.extend(rows);

        tracing::debug!(event_count = count, "Appended events to outbox");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Clone, Debug)]
    struct Pinged {
        n: u32,
    }

    impl DomainEvent for Pinged {
        fn event_type() -> &'static str {
            "Pinged"
        }
    }

    #[tokio::test]
    async fn test_append_and_drain() {
        let outbox = InMemoryOutbox::new();
        let aggregate_id = Uuid::new_v4();
        let correlation_id = Uuid::new_v4();

        let cause = Uuid::new_v4();
        let envelopes = (1..=2)
            .map(|n| {
                EventEnvelope::new(aggregate_id, n, "Pinged".to_string(), Pinged { n: n as u32 }, correlation_id)
                    .with_causation(cause)
            })
            .collect();

        outbox.append(envelopes).await.unwrap();

        let messages = outbox.messages_for(aggregate_id).await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sequence_number, 1);
        assert_eq!(messages[1].payload, r#"{"n":2}"#);
        assert_eq!(messages[1].correlation_id, correlation_id);
        assert_eq!(messages[1].causation_id, Some(cause));

        let drained = outbox.drain().await;
        assert_eq!(drained.len(), 2);
        assert!(outbox.is_empty().await);
    }
}
