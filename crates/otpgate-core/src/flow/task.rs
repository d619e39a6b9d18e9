#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default, Clone)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    CredentialSubmit,
    OtpSubmit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TaskMeta {
    #[default]
    None,
    /// Identifier captured when the credentials were sent.
    Credentials { identifier: String },
}

/// The single remote call a flow may have in flight.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    active: Option<(TaskId, TaskKind)>,
    meta: TaskMeta,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn kind(&self) -> Option<TaskKind> {
        self.active.map(|(_, kind)| kind)
    }

    pub fn start(&mut self, seq: &mut TaskSeq, kind: TaskKind, meta: TaskMeta) -> TaskId {
        let id = seq.next_id();
        self.active = Some((id, kind));
        self.meta = meta;
        id
    }

    /// Ends the task if `id` is the active one, handing back its metadata.
    ///
    /// Returns `None` for stale ids; their results must be dropped.
    pub fn finish_if_active(&mut self, id: TaskId) -> Option<TaskMeta> {
        match self.active {
            Some((active, _)) if active == id => {
                self.active = None;
                Some(std::mem::take(&mut self.meta))
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.meta = TaskMeta::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_only_active_task() {
        let mut seq = TaskSeq::default();
        let mut state = TaskState::default();

        let first = state.start(&mut seq, TaskKind::OtpSubmit, TaskMeta::None);
        assert!(state.is_running());
        assert_eq!(state.kind(), Some(TaskKind::OtpSubmit));

        state.clear();
        let second = state.start(&mut seq, TaskKind::OtpSubmit, TaskMeta::None);
        assert_ne!(first, second);

        assert_eq!(state.finish_if_active(first), None);
        assert!(state.is_running());
        assert_eq!(state.finish_if_active(second), Some(TaskMeta::None));
        assert!(!state.is_running());
        assert_eq!(state.finish_if_active(second), None);
    }

    #[test]
    fn test_finish_returns_meta() {
        let mut seq = TaskSeq::default();
        let mut state = TaskState::default();
        let meta = TaskMeta::Credentials {
            identifier: "a@b.com".to_string(),
        };
        let id = state.start(&mut seq, TaskKind::CredentialSubmit, meta.clone());
        assert_eq!(state.finish_if_active(id), Some(meta));
    }
}
