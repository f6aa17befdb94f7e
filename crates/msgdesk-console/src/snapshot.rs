// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The read-side copy of all six tables.

use msgdesk_core::rows;
use msgdesk_core::{
    ByChannel, Category, Channel, DeskError, FunnelAssignment, MessageRecord, RecordStore,
    SalesFunnel, Table,
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Everything the console renders from, as of the last successful reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub messages: ByChannel<Vec<MessageRecord>>,
    pub categories: ByChannel<Vec<Category>>,
    pub funnels: Vec<SalesFunnel>,
    pub assignments: Vec<FunnelAssignment>,
}

impl Snapshot {
    /// Reads all six tables concurrently.
    ///
    /// Any failed read or undecodable row fails the whole load; partial
    /// results are discarded.
    pub async fn load(store: &dyn RecordStore) -> Result<Self, DeskError> {
        let (sms, email, sms_categories, email_categories, funnels, assignments) = tokio::try_join!(
            fetch::<MessageRecord>(store, Table::TextMessages),
            fetch::<MessageRecord>(store, Table::EmailMessages),
            fetch::<Category>(store, Table::Categories),
            fetch::<Category>(store, Table::EmailCategories),
            fetch::<SalesFunnel>(store, Table::SalesFunnels),
            fetch::<FunnelAssignment>(store, Table::FunnelContentAssignments),
        )?;

        Ok(Self {
            messages: ByChannel::new(sms, email),
            categories: ByChannel::new(sms_categories, email_categories),
            funnels,
            assignments,
        })
    }

    /// Finds a message of `channel` by id.
    pub fn message(&self, channel: Channel, id: &str) -> Option<&MessageRecord> {
        self.messages.get(channel).iter().find(|m| m.id == id)
    }

    /// Finds a category of `channel` by id.
    pub fn category(&self, channel: Channel, id: &str) -> Option<&Category> {
        self.categories.get(channel).iter().find(|c| c.id == id)
    }
}

async fn fetch<T: DeserializeOwned>(store: &dyn RecordStore, table: Table) -> Result<Vec<T>, DeskError> {
    let raw = store.select_all(table, table.default_order()).await?;
    debug!(table = %table, rows = raw.len(), "table read");
    rows::decode(table, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgdesk_core::MessageType;
    use msgdesk_test_utils::fixtures::{assignment, category, funnel, message, sent};
    use msgdesk_test_utils::{MemoryStore, StoreOp};

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .seed(
                Table::TextMessages,
                &[message("s1", MessageType::Broadcast, "Welcome")],
            )
            .await;
        store
            .seed(
                Table::EmailMessages,
                &[sent(
                    message("e1", MessageType::EmailBroadcast, "Launch"),
                    "2026-02-01T09:00:00Z",
                )],
            )
            .await;
        store
            .seed(Table::EmailCategories, &[category("c2", "B"), category("c1", "A")])
            .await;
        store.seed(Table::SalesFunnels, &[funnel("f1", "Onboarding")]).await;
        store
            .seed(Table::FunnelContentAssignments, &[assignment("a1", "f1", "s1")])
            .await;
        store
    }

    #[tokio::test]
    async fn load_reads_every_table_once() {
        let store = seeded_store().await;
        let snapshot = Snapshot::load(&store).await.unwrap();

        assert_eq!(snapshot.messages.sms.len(), 1);
        assert!(snapshot.messages.email[0].is_sent());
        // name-ordered read
        let names: Vec<&str> = snapshot
            .categories
            .email
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(snapshot.funnels.len(), 1);
        assert_eq!(snapshot.assignments.len(), 1);
        assert_eq!(store.calls().await.len(), 6);
        assert!(snapshot.message(Channel::Sms, "s1").is_some());
        assert!(snapshot.message(Channel::Email, "s1").is_none());
    }

    #[tokio::test]
    async fn one_failed_read_fails_the_load() {
        let store = seeded_store().await;
        store.fail(Table::SalesFunnels, StoreOp::Select).await;
        assert!(Snapshot::load(&store).await.is_err());
    }

    #[tokio::test]
    async fn undecodable_row_fails_the_load() {
        let store = seeded_store().await;
        let mut bad = serde_json::Map::new();
        bad.insert("id".into(), "x".into());
        store.seed_rows(Table::Categories, vec![bad]).await;
        let err = Snapshot::load(&store).await.unwrap_err();
        assert!(matches!(err, DeskError::Decode { .. }));
    }
}
