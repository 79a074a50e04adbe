use std::{cell::Cell, rc::Rc};

/// Set while a remote event is being applied, so the local hooks that would
/// normally broadcast the resulting change stay quiet instead of echoing it.
#[derive(Clone, Debug, Default)]
pub struct PatchFlag {
    ignoring: Rc<Cell<bool>>,
}

impl PatchFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.ignoring.get()
    }

    /// Raises the flag until the returned guard is dropped
    #[must_use = "the flag is lowered as soon as the guard is dropped"]
    pub fn suppress(&self) -> PatchGuard {
        let previous = self.ignoring.replace(true);
        PatchGuard {
            ignoring: self.ignoring.clone(),
            previous,
        }
    }
}

pub struct PatchGuard {
    ignoring: Rc<Cell<bool>>,
    previous: bool,
}

impl Drop for PatchGuard {
    fn drop(&mut self) {
        self.ignoring.set(self.previous);
    }
}
