use serde::Serialize;

/// Address the server binds to when no argument is given.
pub const DEFAULT_ADDR: &str = "localhost:18927";

/// Fixed drawing space every fish is laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
    /// Nose-to-body-end length of the fish; every other size scales from it.
    pub fish_length: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            center_x: 300.0,
            center_y: 300.0,
            fish_length: 300.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServeConfig {
    pub addr: String,
    pub workers: usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

impl ServeConfig {
    pub fn with_addr(addr: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(addr) = addr {
            config.addr = addr;
        }
        config
    }
}
