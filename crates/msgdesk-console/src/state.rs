// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Console state and the handlers a shell wires to its commands.
//!
//! [`Console`] owns the store handle and a [`ConsoleState`]. Every handler
//! that writes performs one single-row write and then a full reload. A
//! failed write leaves the snapshot untouched and returns the alert to show.

use std::sync::Arc;

use msgdesk_core::{
    Category, Channel, MessageRecord, MessageTab, RecordStore, SalesFunnel, Timestamp, timestamp,
};
use tracing::{error, info};

use crate::error::ConsoleError;
use crate::forms::{CategoryForm, FormStatus, MessageForm};
use crate::operations;
use crate::projector::{self, ViewFilter};
use crate::snapshot::Snapshot;

/// Top-level console section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MainTab {
    #[default]
    Messages,
    Categories,
}

/// An open create/edit message dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDialog {
    pub form: MessageForm,
    /// The record being edited; `None` when creating.
    pub editing: Option<MessageRecord>,
}

/// A broadcast awaiting send confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSend {
    pub message: MessageRecord,
    /// True while the send write is in flight.
    pub sending: bool,
}

/// An open create/edit category form.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDialog {
    pub form: CategoryForm,
    pub editing: Option<Category>,
}

/// Everything the console displays, minus the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleState {
    pub main_tab: MainTab,
    pub category_tab: Channel,
    pub message_tab: MessageTab,
    pub search: String,
    /// Empty means all categories.
    pub selected_category: String,
    pub snapshot: Snapshot,
    pub loading: bool,
    pub message_dialog: Option<MessageDialog>,
    pub pending_send: Option<PendingSend>,
    pub category_dialog: Option<CategoryDialog>,
}

impl ConsoleState {
    pub fn new(message_tab: MessageTab) -> Self {
        Self {
            main_tab: MainTab::Messages,
            category_tab: Channel::Sms,
            message_tab,
            search: String::new(),
            selected_category: String::new(),
            snapshot: Snapshot::default(),
            loading: false,
            message_dialog: None,
            pending_send: None,
            category_dialog: None,
        }
    }

    pub fn filter(&self) -> ViewFilter<'_> {
        ViewFilter {
            tab: self.message_tab,
            search: &self.search,
            category: &self.selected_category,
        }
    }

    /// The rows of the message table, filtered and ordered.
    pub fn visible_messages(&self) -> Vec<&MessageRecord> {
        projector::project(&self.snapshot, &self.filter())
    }

    pub fn funnel_map(&self) -> std::collections::HashMap<&str, Vec<&SalesFunnel>> {
        projector::funnel_map(&self.snapshot)
    }

    /// Category dropdown options for the message tab.
    pub fn category_options(&self) -> &[Category] {
        projector::category_options(&self.snapshot, self.message_tab)
    }

    /// The list shown on the categories section.
    pub fn visible_categories(&self) -> &[Category] {
        self.snapshot.categories.get(self.category_tab)
    }
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new(MessageTab::default())
    }
}

/// The console: a store handle plus the state it renders from.
pub struct Console {
    store: Arc<dyn RecordStore>,
    state: ConsoleState,
    clock: fn() -> Timestamp,
}

impl Console {
    pub fn new(store: Arc<dyn RecordStore>, message_tab: MessageTab) -> Self {
        Self {
            store,
            state: ConsoleState::new(message_tab),
            clock: timestamp::now,
        }
    }

    /// Replaces the time source used for created, updated and sent stamps.
    pub fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    // --- Navigation and filters ---

    pub fn set_main_tab(&mut self, tab: MainTab) {
        self.state.main_tab = tab;
    }

    pub fn set_message_tab(&mut self, tab: MessageTab) {
        self.state.message_tab = tab;
    }

    pub fn set_category_tab(&mut self, channel: Channel) {
        self.state.category_tab = channel;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.state.search = term.into();
    }

    pub fn set_selected_category(&mut self, name: impl Into<String>) {
        self.state.selected_category = name.into();
    }

    // --- Reload ---

    /// Replaces the snapshot with a fresh read of all six tables.
    ///
    /// On failure the previous snapshot is kept.
    pub async fn reload(&mut self) -> Result<(), ConsoleError> {
        self.state.loading = true;
        let result = Snapshot::load(self.store.as_ref()).await;
        self.state.loading = false;

        match result {
            Ok(snapshot) => {
                info!(
                    sms = snapshot.messages.sms.len(),
                    email = snapshot.messages.email.len(),
                    funnels = snapshot.funnels.len(),
                    "snapshot reloaded"
                );
                self.state.snapshot = snapshot;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to load data");
                Err(ConsoleError::Load(e))
            }
        }
    }

    fn find_message(&self, id: &str) -> Result<&MessageRecord, ConsoleError> {
        self.state
            .snapshot
            .message(self.state.message_tab.channel(), id)
            .ok_or_else(|| ConsoleError::NotFound {
                kind: "message",
                id: id.to_string(),
            })
    }

    // --- Message dialog ---

    pub fn open_create_message(&mut self) {
        self.state.message_dialog = Some(MessageDialog {
            form: MessageForm::blank(self.state.message_tab.channel()),
            editing: None,
        });
    }

    pub fn open_edit_message(&mut self, id: &str) -> Result<(), ConsoleError> {
        let record = self.find_message(id)?.clone();
        self.state.message_dialog = Some(MessageDialog {
            form: MessageForm::seeded(&record),
            editing: Some(record),
        });
        Ok(())
    }

    pub fn message_form_mut(&mut self) -> Option<&mut MessageForm> {
        self.state.message_dialog.as_mut().map(|d| &mut d.form)
    }

    pub fn cancel_message_dialog(&mut self) {
        self.state.message_dialog = None;
    }

    /// Validates and writes the open message dialog.
    ///
    /// The write targets the active tab's table and kind. On success the
    /// dialog closes and the snapshot reloads; on failure the form keeps its
    /// fields and records the alert.
    pub async fn save_message(&mut self) -> Result<(), ConsoleError> {
        let tab = self.state.message_tab;
        let now = (self.clock)();
        let dialog = self
            .state
            .message_dialog
            .as_mut()
            .ok_or(ConsoleError::NothingOpen("message dialog"))?;

        let created = dialog.editing.is_none().then_some(now);
        let payload = dialog.form.payload(tab.message_type(), created)?;
        let editing_id = dialog.editing.as_ref().map(|m| m.id.clone());
        dialog.form.status = FormStatus::Submitting;

        let store = self.store.as_ref();
        let result = match &editing_id {
            Some(id) => operations::update_message(store, tab.channel(), id, &payload, now).await,
            None => operations::create_message(store, tab.channel(), &payload).await,
        };

        if let Err(e) = result {
            error!(error = %e, "failed to save message");
            let err = ConsoleError::SaveMessage(e);
            if let Some(dialog) = self.state.message_dialog.as_mut() {
                dialog.form.status = FormStatus::Failed(err.to_string());
            }
            return Err(err);
        }

        self.state.message_dialog = None;
        self.reload().await
    }

    // --- Row actions ---

    /// Duplicates a message of the active tab.
    pub async fn copy_message(&mut self, id: &str) -> Result<(), ConsoleError> {
        let source = self.find_message(id)?.clone();
        if let Err(e) = operations::copy_message(self.store.as_ref(), &source, (self.clock)()).await
        {
            error!(error = %e, id, "failed to copy message");
            return Err(ConsoleError::CopyMessage(e));
        }
        self.reload().await
    }

    /// Deletes a message from the active tab's table. Confirmation is the
    /// caller's job.
    pub async fn delete_message(&mut self, id: &str) -> Result<(), ConsoleError> {
        let channel = self.state.message_tab.channel();
        if let Err(e) = operations::delete_message(self.store.as_ref(), channel, id).await {
            error!(error = %e, id, "failed to delete message");
            return Err(ConsoleError::DeleteMessage(e));
        }
        self.reload().await
    }

    // --- Send confirmation ---

    /// Opens the send confirmation for an unsent broadcast.
    pub fn request_send(&mut self, id: &str) -> Result<&MessageRecord, ConsoleError> {
        let record = self.find_message(id)?;
        if !record.can_send() {
            return Err(ConsoleError::NotSendable {
                name: record.content_name.clone(),
            });
        }
        let message = record.clone();
        let pending = self.state.pending_send.insert(PendingSend {
            message,
            sending: false,
        });
        Ok(&pending.message)
    }

    pub fn cancel_send(&mut self) {
        self.state.pending_send = None;
    }

    /// Stamps `sent_date` on the pending message.
    ///
    /// The confirmation stays open if the write fails.
    pub async fn confirm_send(&mut self) -> Result<(), ConsoleError> {
        let now = (self.clock)();
        let pending = self
            .state
            .pending_send
            .as_mut()
            .ok_or(ConsoleError::NothingOpen("send confirmation"))?;
        pending.sending = true;
        let message = pending.message.clone();

        let result = operations::send_message(self.store.as_ref(), &message, now).await;
        if let Some(pending) = self.state.pending_send.as_mut() {
            pending.sending = false;
        }

        if let Err(e) = result {
            error!(error = %e, id = %message.id, "failed to send message");
            return Err(ConsoleError::SendMessage(e));
        }

        self.state.pending_send = None;
        self.reload().await
    }

    // --- Category form ---

    pub fn open_create_category(&mut self) {
        self.state.category_dialog = Some(CategoryDialog {
            form: CategoryForm::blank(),
            editing: None,
        });
    }

    pub fn open_edit_category(&mut self, id: &str) -> Result<(), ConsoleError> {
        let category = self
            .state
            .snapshot
            .category(self.state.category_tab, id)
            .cloned()
            .ok_or_else(|| ConsoleError::NotFound {
                kind: "category",
                id: id.to_string(),
            })?;
        self.state.category_dialog = Some(CategoryDialog {
            form: CategoryForm::seeded(&category),
            editing: Some(category),
        });
        Ok(())
    }

    pub fn category_form_mut(&mut self) -> Option<&mut CategoryForm> {
        self.state.category_dialog.as_mut().map(|d| &mut d.form)
    }

    pub fn cancel_category_form(&mut self) {
        self.state.category_dialog = None;
    }

    /// Validates and writes the open category form against the category tab.
    pub async fn save_category(&mut self) -> Result<(), ConsoleError> {
        let channel = self.state.category_tab;
        let now = (self.clock)();
        let dialog = self
            .state
            .category_dialog
            .as_mut()
            .ok_or(ConsoleError::NothingOpen("category form"))?;

        let payload = dialog.form.payload()?;
        let editing_id = dialog.editing.as_ref().map(|c| c.id.clone());
        dialog.form.status = FormStatus::Submitting;

        let store = self.store.as_ref();
        let result = match &editing_id {
            Some(id) => operations::update_category(store, channel, id, &payload, now).await,
            None => operations::create_category(store, channel, &payload).await,
        };

        if let Err(e) = result {
            error!(error = %e, "failed to save category");
            let err = ConsoleError::SaveCategory(e);
            if let Some(dialog) = self.state.category_dialog.as_mut() {
                dialog.form.status = FormStatus::Failed(err.to_string());
            }
            return Err(err);
        }

        self.state.category_dialog = None;
        self.reload().await
    }

    /// Deletes a category from the category tab's list.
    pub async fn delete_category(&mut self, id: &str) -> Result<(), ConsoleError> {
        let channel = self.state.category_tab;
        if let Err(e) = operations::delete_category(self.store.as_ref(), channel, id).await {
            error!(error = %e, id, "failed to delete category");
            return Err(ConsoleError::DeleteCategory(e));
        }
        self.reload().await
    }
}
