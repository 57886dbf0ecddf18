use std::cell::RefCell;
use std::rc::Rc;

use yew::Callback;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            ToastKind::Success => "linear-gradient(135deg, #4ade80, #22c55e)",
            ToastKind::Error => "linear-gradient(135deg, #f87171, #ef4444)",
        }
    }

    pub fn icon_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "fa-check-circle",
            ToastKind::Error => "fa-exclamation-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastRequest {
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastEntry {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
    /// Set once the exit animation has started.
    pub leaving: bool,
}

/// Toasts currently on screen, oldest first. No de-duplication.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastStack {
    next_id: u32,
    entries: Vec<ToastEntry>,
}

impl ToastStack {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(ToastEntry {
            id,
            kind,
            message: message.into(),
            leaving: false,
        });
        id
    }

    /// Starts the exit of toast `id`. Returns false if it is already leaving or gone,
    /// so a manual close and the auto-dismiss never both schedule a removal.
    pub fn dismiss(&mut self, id: u32) -> bool {
        match self.entries.iter_mut().find(|t| t.id == id) {
            Some(toast) if !toast.leaving => {
                toast.leaving = true;
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.entries.len();
        self.entries.retain(|t| t.id != id);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[ToastEntry] {
        &self.entries
    }
}

/// How long a toast stays up before its exit starts, and how long the exit
/// animation runs before it is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastLifecycle {
    lifetime_ms: u32,
    exit_ms: u32,
}

impl ToastLifecycle {
    pub fn new(lifetime_ms: u32, exit_ms: u32) -> Self {
        Self {
            lifetime_ms,
            exit_ms,
        }
    }

    pub fn lifetime_ms(&self) -> u32 {
        self.lifetime_ms
    }

    pub fn exit_ms(&self) -> u32 {
        self.exit_ms
    }
}

#[derive(Default)]
struct NotifierInner {
    sink: Option<Callback<ToastRequest>>,
    pending: Vec<ToastRequest>,
}

/// Handle the page services use to raise toasts. The `ToastHost` component
/// connects itself on mount; anything raised before that is buffered.
#[derive(Clone, Default)]
pub struct Notifier {
    inner: Rc<RefCell<NotifierInner>>,
}

impl PartialEq for Notifier {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: &str) {
        self.notify(ToastKind::Success, message);
    }

    pub fn error(&self, message: &str) {
        self.notify(ToastKind::Error, message);
    }

    pub fn notify(&self, kind: ToastKind, message: &str) {
        let request = ToastRequest {
            kind,
            message: message.to_string(),
        };
        let sink = self.inner.borrow().sink.clone();
        match sink {
            Some(sink) => sink.emit(request),
            None => self.inner.borrow_mut().pending.push(request),
        }
    }

    pub fn connect(&self, sink: Callback<ToastRequest>) {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            inner.sink = Some(sink.clone());
            std::mem::take(&mut inner.pending)
        };
        for request in pending {
            sink.emit(request);
        }
    }

    pub fn disconnect(&self) {
        self.inner.borrow_mut().sink = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_allows_duplicates_and_dismisses_once() {
        let mut stack = ToastStack::default();
        let first = stack.push(ToastKind::Error, "same");
        let second = stack.push(ToastKind::Error, "same");
        assert_ne!(first, second);
        assert_eq!(stack.entries().len(), 2);

        assert!(stack.dismiss(first));
        assert!(!stack.dismiss(first));
        assert!(stack.entries()[0].leaving);
        assert!(!stack.entries()[1].leaving);

        assert!(stack.remove(first));
        assert!(!stack.remove(first));
        assert!(!stack.dismiss(first));
        assert_eq!(stack.entries().len(), 1);
        assert_eq!(stack.entries()[0].id, second);
    }

    #[test]
    fn kinds_pick_colours_and_icons() {
        assert!(ToastKind::Success.background().contains("#22c55e"));
        assert!(ToastKind::Error.background().contains("#ef4444"));
        assert_eq!(ToastKind::Success.icon_class(), "fa-check-circle");
        assert_eq!(ToastKind::Error.icon_class(), "fa-exclamation-circle");
    }

    #[test]
    fn notifier_buffers_until_connected() {
        let notifier = Notifier::new();
        notifier.success("early");
        notifier.error("also early");

        let seen: Rc<RefCell<Vec<ToastRequest>>> = Rc::default();
        let seen_clone = seen.clone();
        notifier.connect(Callback::from(move |request| seen_clone.borrow_mut().push(request)));
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[0].kind, ToastKind::Success);

        notifier.error("late");
        assert_eq!(seen.borrow().len(), 3);
        assert_eq!(seen.borrow()[2].message, "late");

        notifier.disconnect();
        notifier.success("buffered again");
        assert_eq!(seen.borrow().len(), 3);
    }
}
