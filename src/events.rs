// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Typed notification channel.
//!
//! Listeners register per [`EventKind`] and run in registration order. A listener may drop
//! its own registration through [`Delivery::unsubscribe`]; the removal is applied once the
//! current dispatch has finished, so every listener present at dispatch start is called.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::format::SourceFormat;
use crate::model::Passage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Open,
    New,
    Delete,
    Selected,
    Unselected,
    DblClick,
}

impl EventKind {
    pub const ALL: [Self; 6] = [
        Self::Open,
        Self::New,
        Self::Delete,
        Self::Selected,
        Self::Unselected,
        Self::DblClick,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::New => "new",
            Self::Delete => "delete",
            Self::Selected => "selected",
            Self::Unselected => "unselected",
            Self::DblClick => "dblclick",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseEventKindError;

impl fmt::Display for ParseEventKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown event kind")
    }
}

impl std::error::Error for ParseEventKindError {}

impl FromStr for EventKind {
    type Err = ParseEventKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(ParseEventKindError)
    }
}

/// Payload delivered to listeners. Passages are snapshots taken when the event fired.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent {
    Open { format: SourceFormat, passages: Vec<Passage> },
    New(Passage),
    Delete(Passage),
    Selected(Passage),
    Unselected(Passage),
    DblClick(Passage),
}

impl GraphEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Open { .. } => EventKind::Open,
            Self::New(_) => EventKind::New,
            Self::Delete(_) => EventKind::Delete,
            Self::Selected(_) => EventKind::Selected,
            Self::Unselected(_) => EventKind::Unselected,
            Self::DblClick(_) => EventKind::DblClick,
        }
    }

    /// The single affected passage; `None` for `Open`.
    pub fn passage(&self) -> Option<&Passage> {
        match self {
            Self::Open { .. } => None,
            Self::New(passage)
            | Self::Delete(passage)
            | Self::Selected(passage)
            | Self::Unselected(passage)
            | Self::DblClick(passage) => Some(passage),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Handed to a listener with each event.
#[derive(Debug)]
pub struct Delivery {
    subscription: SubscriptionId,
    unsubscribe: bool,
}

impl Delivery {
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    /// Drops this listener's registration after the current dispatch.
    pub fn unsubscribe(&mut self) {
        self.unsubscribe = true;
    }
}

type Listener = Box<dyn FnMut(&GraphEvent, &mut Delivery)>;

struct Subscriber {
    id: SubscriptionId,
    listener: Listener,
}

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: HashMap<EventKind, Vec<Subscriber>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("next_id", &self.next_id)
            .field("subscribers", &self.len())
            .finish_non_exhaustive()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&GraphEvent, &mut Delivery) + 'static,
    ) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.entry(kind).or_default().push(Subscriber {
            id,
            listener: Box::new(listener),
        });
        id
    }

    /// Removes one registration. Returns `false` if it was already gone.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        for subscribers in self.subscribers.values_mut() {
            if let Some(index) = subscribers.iter().position(|sub| sub.id == id) {
                subscribers.remove(index);
                return true;
            }
        }
        false
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.subscribers.get(&kind).map_or(0, Vec::len)
    }

    pub fn len(&self) -> usize {
        self.subscribers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls every listener registered for the event's kind. Returns how many were called.
    pub fn emit(&mut self, event: &GraphEvent) -> usize {
        let kind = event.kind();
        let Some(subscribers) = self.subscribers.get_mut(&kind) else {
            return 0;
        };

        let mut dropped = Vec::new();
        for subscriber in subscribers.iter_mut() {
            let mut delivery = Delivery {
                subscription: subscriber.id,
                unsubscribe: false,
            };
            (subscriber.listener)(event, &mut delivery);
            if delivery.unsubscribe {
                dropped.push(subscriber.id);
            }
        }

        let called = subscribers.len();
        subscribers.retain(|sub| !dropped.contains(&sub.id));
        tracing::trace!(kind = kind.as_str(), called, dropped = dropped.len(), "event dispatched");
        called
    }
}
