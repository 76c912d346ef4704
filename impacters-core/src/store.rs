//! In-memory domain store.
//!
//! The store is the sole owner of members and events. Everything else reads
//! through slices or mutates through the methods here, one operation at a time.
//! A failed operation leaves both collections untouched.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::error::{ImpactersError, ImpactersResult};
use crate::event::{Event, EventDraft, EventId};
use crate::member::{Member, MemberDraft, MemberId};
use crate::seed;

#[derive(Debug, Clone, Default)]
pub struct Store {
    members: Vec<Member>,
    events: Vec<Event>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the sample members and events.
    pub fn with_demo_data() -> Self {
        let mut store = Self::new();
        seed::load_demo_data(&mut store);
        store
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    // MEMBERS:

    pub fn add_member(&mut self, draft: MemberDraft) -> MemberId {
        let id = MemberId::generate();
        info!(member = %id, name = %draft.name, "Added member");
        self.members.push(Member::from_draft(id, draft));
        id
    }

    /// Insert every draft with a fresh id, preserving input order.
    pub fn bulk_add_members(&mut self, drafts: Vec<MemberDraft>) -> Vec<MemberId> {
        let ids: Vec<MemberId> = drafts
            .into_iter()
            .map(|draft| {
                let id = MemberId::generate();
                self.members.push(Member::from_draft(id, draft));
                id
            })
            .collect();
        info!(count = ids.len(), "Bulk-added members");
        ids
    }

    /// Replace the member with the same id.
    pub fn update_member(&mut self, member: Member) -> ImpactersResult<()> {
        let slot = self
            .members
            .iter_mut()
            .find(|m| m.id == member.id)
            .ok_or(ImpactersError::MemberNotFound(member.id))?;
        info!(member = %member.id, "Updated member");
        *slot = member;
        Ok(())
    }

    /// Remove a member and purge its id from every event's attendance.
    pub fn delete_member(&mut self, id: MemberId) -> ImpactersResult<Member> {
        let index = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or(ImpactersError::MemberNotFound(id))?;
        let removed = self.members.remove(index);

        for event in &mut self.events {
            event.attendance.remove(&id);
        }

        info!(member = %id, name = %removed.name, "Deleted member");
        Ok(removed)
    }

    /// Members whose name contains `term`, ignoring case. An empty term matches everyone.
    pub fn search_members(&self, term: &str) -> Vec<&Member> {
        let needle = term.trim().to_lowercase();
        self.members
            .iter()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .collect()
    }

    // EVENTS:

    pub fn add_event(&mut self, draft: EventDraft) -> EventId {
        let id = EventId::generate();
        info!(event = %id, title = %draft.title, date = %draft.date, "Added event");
        self.events.push(Event::from_draft(id, draft));
        id
    }

    /// Replace the event with the same id.
    ///
    /// Attendance entries that don't name an existing member are dropped.
    pub fn update_event(&mut self, mut event: Event) -> ImpactersResult<()> {
        let known = self.member_ids();
        event.attendance.retain(|id| known.contains(id));

        let slot = self
            .events
            .iter_mut()
            .find(|e| e.id == event.id)
            .ok_or(ImpactersError::EventNotFound(event.id))?;
        info!(event = %event.id, "Updated event");
        *slot = event;
        Ok(())
    }

    /// Remove one event. Members and other events are not touched.
    pub fn delete_event(&mut self, id: EventId) -> ImpactersResult<Event> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(ImpactersError::EventNotFound(id))?;
        let removed = self.events.remove(index);
        info!(event = %id, title = %removed.title, "Deleted event");
        Ok(removed)
    }

    /// Events ordered newest first, as the events list shows them.
    pub fn events_newest_first(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.iter().collect();
        events.sort_by(|a, b| b.date.cmp(&a.date));
        events
    }

    // ATTENDANCE:

    /// Replace an event's attendance set. Every id must name an existing member.
    pub fn set_attendance(
        &mut self,
        event_id: EventId,
        attendees: impl IntoIterator<Item = MemberId>,
    ) -> ImpactersResult<()> {
        let attendees: BTreeSet<MemberId> = attendees.into_iter().collect();
        if self.event(event_id).is_none() {
            return Err(ImpactersError::EventNotFound(event_id));
        }
        if let Some(unknown) = attendees.iter().find(|id| self.member(**id).is_none()) {
            return Err(ImpactersError::MemberNotFound(*unknown));
        }

        let event = self.event_mut(event_id)?;
        debug!(event = %event_id, count = attendees.len(), "Recorded attendance");
        event.attendance = attendees;
        Ok(())
    }

    /// Flip one member's presence at an event and return the new state.
    pub fn toggle_attendance(
        &mut self,
        event_id: EventId,
        member_id: MemberId,
    ) -> ImpactersResult<bool> {
        if self.member(member_id).is_none() {
            return Err(ImpactersError::MemberNotFound(member_id));
        }

        let event = self.event_mut(event_id)?;
        let present = if event.attendance.remove(&member_id) {
            false
        } else {
            event.attendance.insert(member_id);
            true
        };
        debug!(event = %event_id, member = %member_id, present, "Toggled attendance");
        Ok(present)
    }

    fn event_mut(&mut self, id: EventId) -> ImpactersResult<&mut Event> {
        self.events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ImpactersError::EventNotFound(id))
    }

    fn member_ids(&self) -> BTreeSet<MemberId> {
        self.members.iter().map(|m| m.id).collect()
    }
}
