//! Background persistence for the personal dictionary
//!
//! Keeps dictionary writes off the UI thread. Each save request carries the
//! full word list; the writer thread only ever writes the newest snapshot it
//! has been handed. Failed writes are queued for the owner to collect with
//! `take_errors`.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::path::PathBuf;
use std::thread;

use crate::error::SpellCheckError;
use crate::spellcheck::dictionary::write_word_file;

enum WriterMessage {
    Save(Vec<String>),
    /// Reply once every save queued before this message is on disk
    Flush(Sender<()>),
}

/// Handle to the background writer thread. Dropping it stops the thread after
/// pending saves are written.
pub struct DictionaryWriter {
    tx: Sender<WriterMessage>,
    errors: Receiver<SpellCheckError>,
}

impl DictionaryWriter {
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = unbounded::<WriterMessage>();
        let (error_tx, errors) = unbounded();

        thread::Builder::new()
            .name("dictionary-writer".into())
            .spawn(move || run_writer_thread(rx, error_tx, path))
            .map_err(|e| tracing::warn!("Failed to spawn dictionary writer: {}", e))
            .ok();

        Self { tx, errors }
    }

    /// Queue a snapshot for writing (non-blocking)
    pub fn save(&self, words: Vec<String>) {
        // If send fails, the writer thread has stopped - nothing more to do
        let _ = self.tx.send(WriterMessage::Save(words));
    }

    /// Block until everything queued so far has been written
    pub fn flush(&self) {
        let (done_tx, done_rx) = bounded(1);
        if self.tx.send(WriterMessage::Flush(done_tx)).is_ok() {
            let _ = done_rx.recv();
        }
    }

    /// Write failures since the last call
    pub fn take_errors(&self) -> Vec<SpellCheckError> {
        self.errors.try_iter().collect()
    }
}

fn run_writer_thread(
    rx: Receiver<WriterMessage>,
    errors: Sender<SpellCheckError>,
    path: PathBuf,
) {
    while let Ok(message) = rx.recv() {
        match message {
            WriterMessage::Save(mut words) => {
                // Collapse a burst of saves into the latest one
                let mut flushes = Vec::new();
                while let Ok(next) = rx.try_recv() {
                    match next {
                        WriterMessage::Save(newer) => words = newer,
                        WriterMessage::Flush(done) => {
                            flushes.push(done);
                            break;
                        }
                    }
                }
                if let Err(e) = write_word_file(&path, &words) {
                    tracing::warn!("Dictionary writer error: {}", e);
                    let _ = errors.send(e);
                }
                for done in flushes {
                    let _ = done.send(());
                }
            }
            WriterMessage::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
