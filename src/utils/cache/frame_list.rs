use crate::buffer::FrameId;

/// Intrusive links for one frame. All lists built over the same slice of links
/// share it, so a frame can sit in at most one of them at a time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    prev: Option<FrameId>,
    next: Option<FrameId>,
}

/// Doubly linked queue of frame ids threaded through a `[Link]` arena indexed
/// by frame id. Front is the oldest entry, back the most recently pushed.
#[derive(Debug, Default)]
pub(crate) struct FrameList {
    head: Option<FrameId>,
    tail: Option<FrameId>,
    len: usize,
}

impl FrameList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn push_back(&mut self, links: &mut [Link], frame_id: FrameId) {
        let old_tail = self.tail;
        links[frame_id] = Link {
            prev: old_tail,
            next: None,
        };
        match old_tail {
            Some(tail) => links[tail].next = Some(frame_id),
            None => self.head = Some(frame_id),
        }
        self.tail = Some(frame_id);
        self.len += 1;
    }

    /// Caller must guarantee `frame_id` is currently linked into this list.
    pub fn unlink(&mut self, links: &mut [Link], frame_id: FrameId) {
        let Link { prev, next } = links[frame_id];
        match prev {
            Some(prev) => links[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => links[next].prev = prev,
            None => self.tail = prev,
        }
        links[frame_id] = Link::default();
        self.len -= 1;
    }

    pub fn move_to_back(&mut self, links: &mut [Link], frame_id: FrameId) {
        if self.tail == Some(frame_id) {
            return;
        }
        self.unlink(links, frame_id);
        self.push_back(links, frame_id);
    }

    /// Walks from the oldest entry towards the newest.
    pub fn iter<'a>(&self, links: &'a [Link]) -> FrameListIter<'a> {
        FrameListIter {
            links,
            cursor: self.head,
        }
    }
}

pub(crate) struct FrameListIter<'a> {
    links: &'a [Link],
    cursor: Option<FrameId>,
}

impl Iterator for FrameListIter<'_> {
    type Item = FrameId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        self.cursor = self.links[current].next;
        Some(current)
    }
}
