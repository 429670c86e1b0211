use parking_lot::Mutex;

/// Navigation collaborator: pages ask it to move the visitor elsewhere.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Records every navigation, most recent last
#[derive(Default)]
pub struct History {
    entries: Mutex<Vec<String>>,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(vec![initial.into()]),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.entries.lock().last().cloned()
    }

    #[allow(dead_code)]
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

impl Navigator for History {
    fn navigate(&self, path: &str) {
        tracing::debug!(path = path, "Navigate");
        self.entries.lock().push(path.to_string());
    }
}
