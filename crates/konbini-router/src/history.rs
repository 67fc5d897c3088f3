//! Doubly linked history chain stored in a slot arena.
//!
//! Entries are addressed by generational [`EntryId`] handles instead of
//! references. Pruning a forward branch frees its slots and bumps their
//! generation, so handles into the pruned branch resolve to nothing.

use crate::params::Params;

/// Handle to one history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId {
    index: usize,
    generation: u32,
}

/// One visited (route, params, page) triple.
pub struct HistoryEntry<P: ?Sized> {
    route: String,
    params: Params,
    page: Box<P>,
    prev: Option<EntryId>,
    next: Option<EntryId>,
}

impl<P: ?Sized> HistoryEntry<P> {
    fn new(route: String, params: Params, page: Box<P>) -> Self {
        Self {
            route,
            params,
            page,
            prev: None,
            next: None,
        }
    }

    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    #[must_use]
    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// Swap in a new page, keeping route, params and links.
    pub fn replace_page(&mut self, page: Box<P>) -> Box<P> {
        std::mem::replace(&mut self.page, page)
    }

    #[must_use]
    pub fn prev(&self) -> Option<EntryId> {
        self.prev
    }

    #[must_use]
    pub fn next(&self) -> Option<EntryId> {
        self.next
    }
}

enum Slot<P: ?Sized> {
    Occupied {
        generation: u32,
        entry: HistoryEntry<P>,
    },
    Vacant {
        generation: u32,
        next_free: Option<usize>,
    },
}

impl<P: ?Sized> Slot<P> {
    fn generation(&self) -> u32 {
        match self {
            Self::Occupied { generation, .. } | Self::Vacant { generation, .. } => *generation,
        }
    }
}

/// Arena-backed history chain.
pub struct History<P: ?Sized> {
    slots: Vec<Slot<P>>,
    free_head: Option<usize>,
    head: Option<EntryId>,
    len: usize,
}

impl<P: ?Sized> Default for History<P> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            head: None,
            len: 0,
        }
    }
}

impl<P: ?Sized> History<P> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry and install a single head entry.
    pub fn start(&mut self, route: String, params: Params, page: Box<P>) -> EntryId {
        if let Some(old_head) = self.head.take() {
            self.free_chain(old_head);
        }
        let id = self.alloc(HistoryEntry::new(route, params, page));
        self.head = Some(id);
        id
    }

    /// Link a new entry right after `at`.
    ///
    /// Whatever followed `at` is freed first. Returns the new handle and the
    /// number of pruned entries, or `None` if `at` is stale.
    pub fn append_after(
        &mut self,
        at: EntryId,
        route: String,
        params: Params,
        page: Box<P>,
    ) -> Option<(EntryId, usize)> {
        let forward = self.get(at)?.next;
        let pruned = match forward {
            Some(first) => self.free_chain(first),
            None => 0,
        };

        let mut entry = HistoryEntry::new(route, params, page);
        entry.prev = Some(at);
        let id = self.alloc(entry);
        if let Some(anchor) = self.get_mut(at) {
            anchor.next = Some(id);
        }
        Some((id, pruned))
    }

    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&HistoryEntry<P>> {
        match self.slots.get(id.index)? {
            Slot::Occupied { generation, entry } if *generation == id.generation => Some(entry),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut HistoryEntry<P>> {
        match self.slots.get_mut(id.index)? {
            Slot::Occupied { generation, entry } if *generation == id.generation => Some(entry),
            _ => None,
        }
    }

    #[must_use]
    pub fn prev_of(&self, id: EntryId) -> Option<EntryId> {
        self.get(id)?.prev
    }

    #[must_use]
    pub fn next_of(&self, id: EntryId) -> Option<EntryId> {
        self.get(id)?.next
    }

    #[must_use]
    pub fn head(&self) -> Option<EntryId> {
        self.head
    }

    /// Number of linked entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Entries from head to tail.
    pub fn iter(&self) -> Iter<'_, P> {
        Iter {
            history: self,
            cursor: self.head,
        }
    }

    /// Check that the head has no predecessor, that every adjacent pair is
    /// mutually linked, and that the walk covers exactly `len` entries.
    #[must_use]
    pub fn verify_links(&self) -> bool {
        let Some(head) = self.head else {
            return self.len == 0;
        };
        match self.get(head) {
            Some(entry) if entry.prev.is_none() => {}
            _ => return false,
        }
        let mut count = 0;
        let mut cursor = Some(head);
        while let Some(id) = cursor {
            let Some(entry) = self.get(id) else {
                return false;
            };
            count += 1;
            if count > self.len {
                return false;
            }
            if let Some(next) = entry.next {
                if self.prev_of(next) != Some(id) {
                    return false;
                }
            }
            cursor = entry.next;
        }
        count == self.len
    }

    fn alloc(&mut self, entry: HistoryEntry<P>) -> EntryId {
        self.len += 1;
        if let Some(index) = self.free_head {
            let (generation, next_free) = match &self.slots[index] {
                Slot::Vacant {
                    generation,
                    next_free,
                } => (*generation, *next_free),
                Slot::Occupied { generation, .. } => (*generation, None),
            };
            self.free_head = next_free;
            self.slots[index] = Slot::Occupied { generation, entry };
            return EntryId { index, generation };
        }
        let index = self.slots.len();
        self.slots.push(Slot::Occupied {
            generation: 0,
            entry,
        });
        EntryId {
            index,
            generation: 0,
        }
    }

    /// Free `first` and everything after it. Unlinks `first` from its
    /// predecessor.
    fn free_chain(&mut self, first: EntryId) -> usize {
        if let Some(prev) = self.prev_of(first) {
            if let Some(entry) = self.get_mut(prev) {
                entry.next = None;
            }
        }
        let mut freed = 0;
        let mut cursor = Some(first);
        while let Some(id) = cursor {
            cursor = self.next_of(id);
            if self.release(id) {
                freed += 1;
            }
        }
        freed
    }

    fn release(&mut self, id: EntryId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        let generation = self.slots[id.index].generation().wrapping_add(1);
        self.slots[id.index] = Slot::Vacant {
            generation,
            next_free: self.free_head,
        };
        self.free_head = Some(id.index);
        self.len -= 1;
        true
    }
}

/// Head-to-tail iterator over a [`History`].
pub struct Iter<'a, P: ?Sized> {
    history: &'a History<P>,
    cursor: Option<EntryId>,
}

impl<'a, P: ?Sized> Iterator for Iter<'a, P> {
    type Item = (EntryId, &'a HistoryEntry<P>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let entry = self.history.get(id)?;
        self.cursor = entry.next;
        Some((id, entry))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn routes(history: &History<str>) -> Vec<String> {
        history
            .iter()
            .map(|(_, e)| e.route().to_owned())
            .collect()
    }

    fn push(history: &mut History<str>, at: EntryId, route: &str) -> (EntryId, usize) {
        history
            .append_after(at, route.into(), Params::new(), route.into())
            .expect("anchor is live")
    }

    #[test]
    fn start_installs_single_head() {
        let mut history: History<str> = History::new();
        assert!(history.is_empty());
        assert!(history.verify_links());

        let head = history.start("home".into(), Params::new(), "home".into());
        assert_eq!(history.head(), Some(head));
        assert_eq!(history.next_of(head), None);
        assert_eq!(history.len(), 1);
        assert_eq!(history.prev_of(head), None);
        assert_eq!(history.get(head).map(HistoryEntry::page), Some("home"));
        assert!(history.verify_links());
    }

    #[test]
    fn append_links_both_directions() {
        let mut history: History<str> = History::new();
        let a = history.start("a".into(), Params::new(), "a".into());
        let (b, pruned) = push(&mut history, a, "b");
        let (c, _) = push(&mut history, b, "c");

        assert_eq!(pruned, 0);
        assert_eq!(history.next_of(a), Some(b));
        assert_eq!(history.prev_of(b), Some(a));
        assert_eq!(history.next_of(b), Some(c));
        assert_eq!(history.prev_of(c), Some(b));
        assert_eq!(routes(&history), ["a", "b", "c"]);
        assert!(history.verify_links());
    }

    #[test]
    fn append_from_middle_prunes_forward_branch() {
        let mut history: History<str> = History::new();
        let a = history.start("a".into(), Params::new(), "a".into());
        let (b, _) = push(&mut history, a, "b");
        let (c, _) = push(&mut history, b, "c");

        let (d, pruned) = push(&mut history, a, "d");
        assert_eq!(pruned, 2);
        assert_eq!(routes(&history), ["a", "d"]);
        assert_eq!(history.len(), 2);
        assert!(history.get(b).is_none());
        assert!(history.get(c).is_none());
        assert_eq!(history.next_of(a), Some(d));
        assert!(history.verify_links());
    }

    #[test]
    fn freed_slots_are_reused_with_new_generation() {
        let mut history: History<str> = History::new();
        let a = history.start("a".into(), Params::new(), "a".into());
        let (b, _) = push(&mut history, a, "b");
        let (c, _) = push(&mut history, a, "c");

        // c reuses b's slot but the stale handle stays dead.
        assert_ne!(b, c);
        assert!(history.get(b).is_none());
        assert_eq!(history.get(c).map(HistoryEntry::route), Some("c"));
        assert_eq!(history.slots.len(), 2);
    }

    #[test]
    fn append_after_stale_anchor_is_rejected() {
        let mut history: History<str> = History::new();
        let a = history.start("a".into(), Params::new(), "a".into());
        let (b, _) = push(&mut history, a, "b");
        push(&mut history, a, "c");
        assert!(history
            .append_after(b, "x".into(), Params::new(), "x".into())
            .is_none());
        assert_eq!(routes(&history), ["a", "c"]);
    }

    #[test]
    fn same_route_twice_creates_distinct_entries() {
        let mut history: History<str> = History::new();
        let a = history.start("a".into(), Params::new(), "a".into());
        let (b1, _) = push(&mut history, a, "b");
        let (a2, _) = push(&mut history, b1, "a");
        assert_ne!(a, a2);
        assert_eq!(routes(&history), ["a", "b", "a"]);
    }

    #[test]
    fn replace_page_keeps_links() {
        let mut history: History<str> = History::new();
        let a = history.start("a".into(), Params::new(), "old".into());
        let (b, _) = push(&mut history, a, "b");
        let old = history.get_mut(a).unwrap().replace_page("new".into());
        assert_eq!(&*old, "old");
        assert_eq!(history.get(a).unwrap().page(), "new");
        assert_eq!(history.next_of(a), Some(b));
    }

    #[test]
    fn start_discards_previous_chain() {
        let mut history: History<str> = History::new();
        let a = history.start("a".into(), Params::new(), "a".into());
        push(&mut history, a, "b");
        let fresh = history.start("z".into(), Params::new(), "z".into());
        assert_eq!(routes(&history), ["z"]);
        assert_eq!(history.head(), Some(fresh));
        assert!(history.get(a).is_none());
        assert_eq!(history.len(), 1);
        assert!(history.verify_links());
    }
}
