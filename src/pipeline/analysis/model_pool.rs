use crate::config::DEFAULT_MODEL_POOL;

/// Round-robin selector over the configured model list.
///
/// Advanced once per retry attempt so a rate-limited or flaky model is not
/// hammered repeatedly; injected into the analyzer rather than shared
/// globally so tests can pin a single model.
#[derive(Debug, Clone)]
pub struct ModelPool {
    models: Vec<String>,
    index: usize,
}

impl Default for ModelPool {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_POOL.iter().map(|m| m.to_string()))
    }
}

impl ModelPool {
    /// Pool over an explicit model list. Empty input falls back to the
    /// built-in list so `next_model` can always answer.
    pub fn new(models: impl IntoIterator<Item = String>) -> Self {
        let mut models: Vec<String> = models.into_iter().collect();
        if models.is_empty() {
            models = DEFAULT_MODEL_POOL.iter().map(|m| m.to_string()).collect();
        }
        Self { models, index: 0 }
    }

    /// Next model in rotation, wrapping at the end of the list.
    pub fn next_model(&mut self) -> &str {
        if self.index >= self.models.len() {
            self.index = 0;
        }
        let model = &self.models[self.index];
        self.index += 1;
        model
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
