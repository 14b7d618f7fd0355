//! Shared fixtures for the pipeline tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use triage_io::{CommandRunner, ToolCommand, ToolOutput};

/// A `CommandRunner` that answers from canned responses and records every
/// invocation.
#[derive(Default)]
pub struct ScriptedRunner {
    captures: HashMap<String, ToolOutput>,
    attached_status: Option<i32>,
    attached_write: Option<(PathBuf, Vec<u8>)>,
    extracted: HashMap<String, Vec<u8>>,
    failing_extractions: HashMap<String, String>,
    unspawnable_extractions: Vec<String>,
    calls: RefCell<Vec<ToolCommand>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful captured output for `program`.
    pub fn with_output(mut self, program: &str, stdout: &str) -> Self {
        self.captures.insert(
            program.to_string(),
            ToolOutput {
                status: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
        self
    }

    pub fn with_failure(mut self, program: &str, code: i32, stderr: &str) -> Self {
        self.captures.insert(
            program.to_string(),
            ToolOutput {
                status: Some(code),
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    /// Non-zero exit that still printed something on stdout.
    pub fn with_failed_output(mut self, program: &str, code: i32, stdout: &str) -> Self {
        self.captures.insert(
            program.to_string(),
            ToolOutput {
                status: Some(code),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
        self
    }

    /// Bytes the attached command writes to `path` before it exits.
    pub fn with_attached_write(mut self, path: &Path, content: &[u8]) -> Self {
        self.attached_write = Some((path.to_path_buf(), content.to_vec()));
        self
    }

    pub fn with_attached_status(mut self, status: Option<i32>) -> Self {
        self.attached_status = status;
        self
    }

    /// Bytes the extractor writes for a metadata address.
    pub fn with_file(mut self, meta: &str, content: &[u8]) -> Self {
        self.extracted.insert(meta.to_string(), content.to_vec());
        self
    }

    pub fn with_failed_extraction(mut self, meta: &str, stderr: &str) -> Self {
        self.failing_extractions
            .insert(meta.to_string(), stderr.to_string());
        self
    }

    pub fn with_unspawnable_extraction(mut self, meta: &str) -> Self {
        self.unspawnable_extractions.push(meta.to_string());
        self
    }

    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, program: &str) -> Vec<ToolCommand> {
        self.calls()
            .into_iter()
            .filter(|c| c.program() == program)
            .collect()
    }

    fn record(&self, command: &ToolCommand) {
        self.calls.borrow_mut().push(command.clone());
    }
}

impl CommandRunner for ScriptedRunner {
    fn capture(&self, command: &ToolCommand) -> io::Result<ToolOutput> {
        self.record(command);
        self.captures
            .get(command.program().to_string_lossy().as_ref())
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "program not found"))
    }

    fn run_attached(&self, command: &ToolCommand) -> io::Result<Option<i32>> {
        self.record(command);
        if let Some((path, content)) = &self.attached_write {
            fs::write(path, content)?;
        }
        Ok(self.attached_status)
    }

    fn run_to_file(&self, command: &ToolCommand, destination: &Path) -> io::Result<ToolOutput> {
        self.record(command);
        let meta = command
            .arguments()
            .last()
            .map(|a| a.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.unspawnable_extractions.contains(&meta) {
            fs::File::create(destination)?;
            return Err(io::Error::new(io::ErrorKind::NotFound, "icat not found"));
        }

        let content = self.extracted.get(&meta).cloned().unwrap_or_default();
        fs::write(destination, content)?;

        Ok(match self.failing_extractions.get(&meta) {
            Some(stderr) => ToolOutput {
                status: Some(1),
                stdout: String::new(),
                stderr: stderr.clone(),
            },
            None => ToolOutput {
                status: Some(0),
                ..Default::default()
            },
        })
    }
}

/// Arguments of a recorded command as plain strings.
pub fn argv(command: &ToolCommand) -> Vec<String> {
    command
        .arguments()
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

pub const LSBLK_TWO_DISKS: &str = "NAME   SIZE MODEL\n\
                                   sda  465.8G Samsung SSD 860 EVO 500GB\n\
                                   sdb   14.9G SanDisk Ultra\n";

pub const MMLS_WITH_LINUX: &str = "DOS Partition Table\n\
                                   Offset Sector: 0\n\
                                   Units are in 512-byte sectors\n\
                                   \n      Slot      Start        End          Length       Description\n\
                                   000:  Meta      0000000000   0000000000   0000000001   Primary Table (#0)\n\
                                   001:  -------   0000000000   0000002047   0000002048   Unallocated\n\
                                   002:  000:000   0000002048   0000206847   0000204800   Linux\n";

pub const MMLS_NO_LINUX: &str = "DOS Partition Table\n\
                                 002:  000:000   0000002048   0000206847   0000204800   NTFS / exFAT (0x07)\n";
