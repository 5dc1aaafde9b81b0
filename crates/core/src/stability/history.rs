use crate::classify::Emotion;

/// Fixed-capacity rolling window of the most recent raw labels. Pushing at
/// capacity evicts the oldest entry. Voting is order-independent; order only
/// determines eviction.
#[derive(Clone, Debug)]
pub struct LabelHistory {
    buf: Vec<Option<Emotion>>,
    head: usize,
    len: usize,
}

impl LabelHistory {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        let mut buf = Vec::with_capacity(capacity);
        buf.resize_with(capacity, || None);
        Self {
            buf,
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a label, returning the evicted oldest label when full.
    pub fn push(&mut self, label: Emotion) -> Option<Emotion> {
        let cap = self.capacity();
        let idx = (self.head + self.len) % cap;

        if self.len < cap {
            self.buf[idx] = Some(label);
            self.len += 1;
            None
        } else {
            let evicted = self.buf[self.head].take();
            self.buf[self.head] = Some(label);
            self.head = (self.head + 1) % cap;
            evicted
        }
    }

    pub fn clear(&mut self) {
        for slot in &mut self.buf {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = Emotion> + '_ {
        (0..self.len).filter_map(move |i| {
            let idx = (self.head + i) % self.capacity();
            self.buf[idx]
        })
    }

    /// The most frequent label and its count. Returns `None` when the window
    /// is empty or when two or more labels tie for most frequent; a tied
    /// round never elects a winner.
    pub fn mode(&self) -> Option<(Emotion, usize)> {
        let mut counts = [0usize; Emotion::ALL.len()];
        for label in self.iter() {
            counts[label as usize] += 1;
        }

        let mut best: Option<(Emotion, usize)> = None;
        let mut tied = false;
        for (i, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            match best {
                None => best = Some((Emotion::ALL[i], count)),
                Some((_, top)) if count > top => {
                    best = Some((Emotion::ALL[i], count));
                    tied = false;
                }
                Some((_, top)) if count == top => tied = true,
                Some(_) => {}
            }
        }

        if tied {
            None
        } else {
            best
        }
    }
}
