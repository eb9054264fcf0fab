use std::collections::VecDeque;

/// A fixed-capacity history window over `f32` observations.
///
/// Pushing onto a full window evicts the oldest entry, so the window always
/// holds the most recent `capacity` observations in arrival order. The agent
/// keeps one window per tracked metric (run scores, attempt counts, match
/// counts) to watch whether learned play improves over random play.
///
/// # Examples
///
/// ```
/// use boatswain_stats::rolling::RollingWindow;
///
/// let mut window = RollingWindow::new(2);
/// window.push(1.0);
/// window.push(2.0);
/// window.push(3.0);
/// assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![2.0, 3.0]);
/// ```
#[derive(Debug, Clone)]
pub struct RollingWindow {
    values: VecDeque<f32>,
    capacity: usize,
}

impl RollingWindow {
    /// Creates an empty window holding at most `capacity` observations.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be positive");
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an observation, evicting the oldest one when full.
    pub fn push(&mut self, value: f32) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over retained observations, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.values.iter()
    }

    /// Mean of the retained observations, or `None` when empty.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> Option<f32> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f32>() / self.values.len() as f32)
    }
}
