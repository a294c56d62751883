use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, Sender},
};

use threadpool::ThreadPool;

use crate::bridge::MarkerHandle;

const PROBE_WORKERS: usize = 2;

/// A request to check whether a flight's destination image can be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    /// Playback generation the request was issued in.
    pub generation: u64,
    pub flight_index: usize,
    pub marker: MarkerHandle,
    pub image_path: String,
}

/// Outcome of a [`ProbeRequest`]. `resolved` is set when the image exists and decodes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub request: ProbeRequest,
    pub resolved: Option<PathBuf>,
}

/// Asynchronous image existence check. Results come back on a later
/// [`ImageProbe::poll`], possibly after the flight that asked was superseded.
pub trait ImageProbe {
    fn request(&mut self, request: ProbeRequest);

    /// Returns the results that completed since the last poll.
    fn poll(&mut self) -> Vec<ProbeResult>;
}

/// Probes images on a small worker pool so a slow disk never stalls a frame.
pub struct ThreadedImageProbe {
    base_dir: PathBuf,
    thread_pool: ThreadPool,
    sender: Sender<ProbeResult>,
    receiver: Receiver<ProbeResult>,
}

impl ThreadedImageProbe {
    /// Image paths of requests are resolved against `base_dir`.
    pub fn new(base_dir: &Path) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            base_dir: base_dir.to_path_buf(),
            thread_pool: ThreadPool::with_name("image-probe".to_string(), PROBE_WORKERS),
            sender,
            receiver,
        }
    }
}

impl ImageProbe for ThreadedImageProbe {
    fn request(&mut self, request: ProbeRequest) {
        let path = self.base_dir.join(&request.image_path);
        let sender = self.sender.clone();

        self.thread_pool.execute(move || {
            let resolved = match image::image_dimensions(&path) {
                Ok(_) => Some(path),
                Err(e) => {
                    log::info!("No image found for {}: {}", path.display(), e);
                    None
                }
            };

            // The receiver only goes away with the probe itself.
            let _ = sender.send(ProbeResult { request, resolved });
        });
    }

    fn poll(&mut self) -> Vec<ProbeResult> {
        self.receiver.try_iter().collect()
    }
}

/// Probe for sessions without destination images: every request fails at once.
#[derive(Debug, Default)]
pub struct NoImages {
    completed: Vec<ProbeResult>,
}

impl ImageProbe for NoImages {
    fn request(&mut self, request: ProbeRequest) {
        self.completed.push(ProbeResult {
            request,
            resolved: None,
        });
    }

    fn poll(&mut self) -> Vec<ProbeResult> {
        std::mem::take(&mut self.completed)
    }
}
