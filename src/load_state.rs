//! Data loading state
//!
//! Shared by the WASM shell (header status) and the CLI (final report).

/// Progress of the two data fetches
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    Loading { dataset: bool, topology: bool },
    Ready,
    Failed(String),
}

impl Default for LoadState {
    fn default() -> Self {
        LoadState::Loading {
            dataset: false,
            topology: false,
        }
    }
}

impl LoadState {
    pub fn dataset_loaded(&mut self) {
        self.advance(true, false);
    }

    pub fn topology_loaded(&mut self) {
        self.advance(false, true);
    }

    /// First failure wins; later successes don't clear it
    pub fn fail(&mut self, reason: impl Into<String>) {
        if !matches!(self, LoadState::Failed(_)) {
            *self = LoadState::Failed(reason.into());
        }
    }

    fn advance(&mut self, ds: bool, topo: bool) {
        if let LoadState::Loading { dataset, topology } = self {
            *dataset |= ds;
            *topology |= topo;
            if *dataset && *topology {
                *self = LoadState::Ready;
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }

    pub fn label(&self) -> String {
        match self {
            LoadState::Loading {
                dataset: false,
                topology: false,
            } => "Loading...".to_string(),
            LoadState::Loading { dataset, .. } => {
                let waiting = if *dataset { "map" } else { "data" };
                format!("Loading {}...", waiting)
            }
            LoadState::Ready => "Ready".to_string(),
            LoadState::Failed(reason) => format!("Failed: {}", reason),
        }
    }
}
