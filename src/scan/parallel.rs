use log::{debug, trace};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::error::ScanError;
use crate::models::{DetectionResult, InstrumentRecord};
use crate::scan::detector::InstrumentDetector;

/// Result type for detection operations
pub type DetectionOutcome = Result<(PathBuf, DetectionResult), (PathBuf, ScanError)>;

/// Worker scanning individual project files
struct DetectorWorker {
    sender: Sender<DetectionOutcome>,
    catalog: Arc<Vec<InstrumentRecord>>,
}

impl DetectorWorker {
    fn new(sender: Sender<DetectionOutcome>, catalog: Arc<Vec<InstrumentRecord>>) -> Self {
        Self { sender, catalog }
    }

    fn process_file(&self, path: PathBuf) {
        let result = InstrumentDetector::new(&self.catalog)
            .map_err(ScanError::from)
            .and_then(|detector| detector.scan_file(&path))
            .map(|result| (path.clone(), result))
            .map_err(|err| (path, err));

        // Send result back to coordinator
        let _ = self.sender.send(result);
    }
}

/// Scans many project files on a fixed pool of threads.
///
/// Every worker reads against the same immutable catalog snapshot, so catalog
/// edits made while a batch runs are not seen by it.
pub struct ParallelDetector {
    thread_count: usize,
    workers: Vec<JoinHandle<()>>,
    results_rx: Receiver<DetectionOutcome>,
    work_tx: Arc<Mutex<Option<Sender<PathBuf>>>>,
}

impl ParallelDetector {
    /// Create a new parallel detector with specified thread count
    pub fn new(thread_count: usize, catalog: Vec<InstrumentRecord>) -> Self {
        let thread_count = thread_count.max(1);
        let catalog = Arc::new(catalog);
        let (results_tx, results_rx): (Sender<DetectionOutcome>, Receiver<DetectionOutcome>) =
            channel();
        let (work_tx, work_rx): (Sender<PathBuf>, Receiver<PathBuf>) = channel();
        let work_tx = Arc::new(Mutex::new(Some(work_tx)));
        let work_rx = Arc::new(Mutex::new(work_rx));

        // Create worker threads
        let mut workers = Vec::with_capacity(thread_count);
        for thread_id in 0..thread_count {
            let results_tx = results_tx.clone();
            let work_rx = Arc::clone(&work_rx);
            let catalog = Arc::clone(&catalog);

            let handle = thread::spawn(move || {
                trace!("Worker thread {} started", thread_id);
                let worker = DetectorWorker::new(results_tx, catalog);

                loop {
                    // The lock is released before the file is scanned.
                    let next = match work_rx.lock() {
                        Ok(rx) => rx.recv(),
                        Err(_) => break,
                    };
                    let Ok(path) = next else {
                        break;
                    };
                    trace!("Worker {} processing file: {}", thread_id, path.display());
                    worker.process_file(path);
                }
                trace!("Worker thread {} exiting", thread_id);
            });

            workers.push(handle);
        }

        Self {
            thread_count,
            workers,
            results_rx,
            work_tx,
        }
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    /// Submit paths for scanning
    pub fn submit_paths(&self, paths: Vec<PathBuf>) -> Result<(), ScanError> {
        debug!("Submitting {} paths to worker threads", paths.len());
        let guard = self
            .work_tx
            .lock()
            .map_err(|_| ScanError::WorkerError("Work queue lock poisoned".to_string()))?;

        let Some(tx) = guard.as_ref() else {
            return Err(ScanError::WorkerError(
                "Worker threads are no longer available".to_string(),
            ));
        };

        for path in paths {
            trace!("Sending path to worker: {}", path.display());
            tx.send(path).map_err(|_| {
                ScanError::WorkerError("Failed to send path to worker thread".to_string())
            })?;
        }
        trace!("Finished submitting all paths");
        Ok(())
    }

    /// Get receiver for detection results
    pub fn get_results_receiver(&self) -> &Receiver<DetectionOutcome> {
        &self.results_rx
    }

    /// Scans `paths` and collects every outcome, in completion order.
    pub fn scan_all(self, paths: Vec<PathBuf>) -> Result<Vec<DetectionOutcome>, ScanError> {
        let expected = paths.len();
        self.submit_paths(paths)?;

        let mut outcomes = Vec::with_capacity(expected);
        while outcomes.len() < expected {
            match self.results_rx.recv() {
                Ok(outcome) => outcomes.push(outcome),
                Err(_) => {
                    debug!("Result channel disconnected, assuming completion");
                    break;
                }
            }
        }
        Ok(outcomes)
    }
}

impl Drop for ParallelDetector {
    fn drop(&mut self) {
        trace!("ParallelDetector being dropped, signaling workers to stop");
        // Drop work sender to signal workers to stop
        if let Ok(mut tx) = self.work_tx.lock() {
            tx.take();
        }

        trace!("Waiting for {} workers to complete", self.workers.len());
        for (i, worker) in self.workers.drain(..).enumerate() {
            trace!("Waiting for worker {} to complete", i);
            let _ = worker.join();
        }
        debug!("All workers completed");
    }
}
