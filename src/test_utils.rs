// SPDX-License-Identifier: MPL-2.0
//! Test helpers: an in-memory media backend that records what the player
//! does to each handle.

use crate::audio::{HandleId, MediaBackend, MediaHandle};
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Recorded state of one opened source.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeMedia {
    pub id: HandleId,
    pub source: PathBuf,
    pub paused: bool,
    /// Simulated playback position in ticks.
    pub position: u32,
    pub plays: u32,
    pub rewinds: u32,
    pub released: bool,
}

type Log = Rc<RefCell<Vec<FakeMedia>>>;

#[derive(Debug)]
pub struct FakeHandle {
    id: HandleId,
    log: Log,
}

impl FakeHandle {
    fn with_media<T>(&self, f: impl FnOnce(&mut FakeMedia) -> T) -> T {
        let mut log = self.log.borrow_mut();
        let media = log
            .iter_mut()
            .find(|m| m.id == self.id)
            .expect("handle missing from log");
        f(media)
    }
}

impl MediaHandle for FakeHandle {
    fn id(&self) -> HandleId {
        self.id
    }

    fn play(&mut self) {
        self.with_media(|m| {
            m.paused = false;
            m.plays += 1;
        });
    }

    fn pause(&mut self) {
        self.with_media(|m| m.paused = true);
    }

    fn rewind(&mut self) {
        self.with_media(|m| {
            m.position = 0;
            m.rewinds += 1;
        });
    }

    fn is_paused(&self) -> bool {
        self.with_media(|m| m.paused)
    }
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.with_media(|m| m.released = true);
    }
}

/// Backend whose handles only record calls.
#[derive(Debug, Default)]
pub struct FakeBackend {
    log: Log,
    next_id: u64,
    finished: Vec<HandleId>,
    failing: HashSet<PathBuf>,
}

impl FakeBackend {
    /// Shared view of every handle ever opened, in open order.
    pub fn log(&self) -> Rc<RefCell<Vec<FakeMedia>>> {
        Rc::clone(&self.log)
    }

    /// Makes `open` fail for `source`.
    pub fn fail_on(&mut self, source: impl Into<PathBuf>) {
        self.failing.insert(source.into());
    }

    /// Queues an end-of-media notification.
    pub fn finish(&mut self, id: HandleId) {
        self.finished.push(id);
    }

    /// Advances the position of every unpaused live handle.
    pub fn advance(&mut self, ticks: u32) {
        for media in self.log.borrow_mut().iter_mut() {
            if !media.paused && !media.released {
                media.position += ticks;
            }
        }
    }
}

impl MediaBackend for FakeBackend {
    type Handle = FakeHandle;

    fn open(&mut self, source: &Path) -> Result<FakeHandle> {
        if self.failing.contains(source) {
            return Err(Error::Audio(format!("cannot open {}", source.display())));
        }
        self.next_id += 1;
        let id = HandleId(self.next_id);
        self.log.borrow_mut().push(FakeMedia {
            id,
            source: source.to_path_buf(),
            paused: true,
            position: 0,
            plays: 0,
            rewinds: 0,
            released: false,
        });
        Ok(FakeHandle {
            id,
            log: Rc::clone(&self.log),
        })
    }

    fn drain_finished(&mut self) -> Vec<HandleId> {
        std::mem::take(&mut self.finished)
    }
}

/// Number of opened handles not yet released.
pub fn live_handles(log: &Rc<RefCell<Vec<FakeMedia>>>) -> usize {
    log.borrow().iter().filter(|m| !m.released).count()
}
