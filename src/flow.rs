//! Commands coming from the UI and the async work they leave behind.
//!
//! The UI layer (a browser tray, a native egui panel, a test) never calls the
//! engine directly. It sends [`ConfiguratorEvent`]s to a
//! [`Context`](crate::context::Context) and gets an [`Out`] back, which holds
//! the texture loads that still have to run. How those run depends on the
//! platform:
//!
//! - native: [`Driver`] blocks on them with a current-thread tokio runtime
//! - wasm: [`spawn_out`] hands them to `wasm_bindgen_futures::spawn_local`
//!
//! Loads may finish before or after further clicks; the scene tolerates both.

use std::{future::Future, pin::Pin};

use crate::data_structures::material::PartId;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// An already-decoded UI event.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfiguratorEvent {
    SwatchSelected(usize),
    PartTabSelected(PartId),
}

pub type LoadFuture = Pin<Box<dyn Future<Output = ()>>>;

///
/// Output of every command. `Out::Load` carries futures that complete texture
/// loads; they have no effect on the scene graph itself and only fill texture
/// slots that materials already point at.
///
/// `Empty` is the default output when nothing is left to do. Dropping a
/// `Load` fails its texture slots; asking for the same texture again retries.
///
#[must_use = "texture loads only run when the Out is driven"]
pub enum Out {
    Load(Vec<LoadFuture>),
    Empty,
}

impl Default for Out {
    fn default() -> Self {
        Self::Empty
    }
}

impl std::fmt::Debug for Out {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Out::Load(futures) => write!(f, "Out::Load({} future(s))", futures.len()),
            Out::Empty => f.write_str("Out::Empty"),
        }
    }
}

impl Out {
    pub fn from_loads(loads: Vec<LoadFuture>) -> Self {
        if loads.is_empty() {
            Out::Empty
        } else {
            Out::Load(loads)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Out::Load(futures) => futures.is_empty(),
            Out::Empty => true,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Out::Load(futures) => futures.len(),
            Out::Empty => 0,
        }
    }

    /// All pending loads as one future.
    pub fn into_joined(self) -> impl Future<Output = ()> {
        let futures = match self {
            Out::Load(futures) => futures,
            Out::Empty => Vec::new(),
        };
        async move {
            futures::future::join_all(futures).await;
        }
    }
}

/// Runs pending loads on native targets.
#[cfg(not(target_arch = "wasm32"))]
pub struct Driver {
    runtime: tokio::runtime::Runtime,
}

#[cfg(not(target_arch = "wasm32"))]
impl Driver {
    pub fn new() -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self { runtime })
    }

    pub fn run(&self, out: Out) {
        if out.is_empty() {
            return;
        }
        let count = out.len();
        self.runtime.block_on(out.into_joined());
        log::debug!("finished {count} texture load(s)");
    }
}

/// Runs pending loads in the browser's event loop.
#[cfg(target_arch = "wasm32")]
pub fn spawn_out(out: Out) {
    if let Out::Load(futures) = out {
        for future in futures {
            wasm_bindgen_futures::spawn_local(future);
        }
    }
}

pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::debug!("logger already initialized");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    init_logging();
}
