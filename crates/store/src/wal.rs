// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log backing the machine store.
//!
//! One JSON object per line (`{"seq":N,"event":...}`). `Wal::open` replays
//! the file; if it finds a line it cannot parse it treats everything from
//! that point on as corruption, keeps the valid prefix, and rotates the
//! original file to `.bak` (bumping any existing `.bak`/`.bak.2` up to
//! `.bak.3`, dropping whatever was in `.bak.3`).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use uk_core::MachineId;

use crate::error::StoreError;
use crate::status::StoredMachine;

const FLUSH_THRESHOLD: u64 = 100;
const FLUSH_INTERVAL: Duration = Duration::from_secs(1);
const MAX_BACKUPS: u32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StoreEvent {
    Put { id: MachineId, machine: StoredMachine },
    Delete { id: MachineId },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalEntry {
    pub seq: u64,
    pub event: StoreEvent,
}

pub struct Wal {
    path: PathBuf,
    file: File,
    entries: Vec<WalEntry>,
    write_seq: u64,
    processed_seq: u64,
    unflushed: u64,
    last_flush: Instant,
}

impl Wal {
    pub fn open(path: &Path, processed_seq: u64) -> Result<Self, StoreError> {
        let (entries, corrupted) = Self::read_entries(path)?;
        if corrupted {
            tracing::warn!(path = %path.display(), "wal corruption detected, rotating to backup");
            Self::rotate_backups(path)?;
        }
        let write_seq = entries.last().map(|e| e.seq).unwrap_or(0);
        let file = Self::rewrite(path, &entries)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
            entries,
            write_seq,
            processed_seq,
            unflushed: 0,
            last_flush: Instant::now(),
        })
    }

    fn read_entries(path: &Path) -> Result<(Vec<WalEntry>, bool), StoreError> {
        if !path.exists() {
            return Ok((Vec::new(), false));
        }
        let bytes = std::fs::read(path)?;
        let mut entries = Vec::new();
        let mut corrupted = false;
        for chunk in bytes.split(|b| *b == b'\n') {
            if chunk.is_empty() {
                continue;
            }
            let parsed = std::str::from_utf8(chunk)
                .ok()
                .and_then(|s| serde_json::from_str::<WalEntry>(s).ok());
            match parsed {
                Some(entry) => entries.push(entry),
                None => {
                    corrupted = true;
                    break;
                }
            }
        }
        Ok((entries, corrupted))
    }

    fn backup_path(path: &Path, n: u32) -> PathBuf {
        let mut s = path.as_os_str().to_os_string();
        if n <= 1 {
            s.push(".bak");
        } else {
            s.push(format!(".bak.{n}"));
        }
        PathBuf::from(s)
    }

    fn rotate_backups(path: &Path) -> Result<(), StoreError> {
        let newest = Self::backup_path(path, MAX_BACKUPS);
        if newest.exists() {
            std::fs::remove_file(&newest)?;
        }
        for n in (1..MAX_BACKUPS).rev() {
            let from = Self::backup_path(path, n);
            if from.exists() {
                std::fs::rename(&from, Self::backup_path(path, n + 1))?;
            }
        }
        if path.exists() {
            std::fs::rename(path, Self::backup_path(path, 1))?;
        }
        Ok(())
    }

    fn rewrite(path: &Path, entries: &[WalEntry]) -> Result<File, StoreError> {
        let mut buf = String::new();
        for e in entries {
            buf.push_str(&serde_json::to_string(e)?);
            buf.push('\n');
        }
        std::fs::write(path, buf.as_bytes())?;
        Ok(OpenOptions::new().append(true).open(path)?)
    }

    pub fn write_seq(&self) -> u64 {
        self.write_seq
    }

    pub fn processed_seq(&self) -> u64 {
        self.processed_seq
    }

    pub fn append(&mut self, event: StoreEvent) -> Result<u64, StoreError> {
        self.write_seq += 1;
        let entry = WalEntry { seq: self.write_seq, event };
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');
        self.file.write_all(line.as_bytes())?;
        self.entries.push(entry);
        self.unflushed += 1;
        Ok(self.write_seq)
    }

    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.file.flush()?;
        self.file.sync_data()?;
        self.unflushed = 0;
        self.last_flush = Instant::now();
        Ok(())
    }

    pub fn needs_flush(&self) -> bool {
        self.unflushed >= FLUSH_THRESHOLD
            || (self.unflushed > 0 && self.last_flush.elapsed() >= FLUSH_INTERVAL)
    }

    pub fn mark_processed(&mut self, seq: u64) {
        if seq > self.processed_seq {
            self.processed_seq = seq;
        }
    }

    pub fn next_unprocessed(&self) -> Option<&WalEntry> {
        self.entries.iter().find(|e| e.seq > self.processed_seq)
    }

    pub fn entries_after(&self, seq: u64) -> Vec<&WalEntry> {
        self.entries.iter().filter(|e| e.seq > seq).collect()
    }

    pub fn truncate_before(&mut self, seq: u64) -> Result<(), StoreError> {
        self.entries.retain(|e| e.seq >= seq);
        self.file = Self::rewrite(&self.path, &self.entries)?;
        Ok(())
    }

    /// Replay the whole log into a fresh materialized map, used at store
    /// open time to rebuild state after a snapshot gap.
    pub fn replay_into(&self, map: &mut std::collections::HashMap<MachineId, StoredMachine>) {
        for entry in &self.entries {
            match &entry.event {
                StoreEvent::Put { id, machine } => {
                    map.insert(id.clone(), machine.clone());
                }
                StoreEvent::Delete { id } => {
                    map.remove(id);
                }
            }
        }
    }
}
