// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted in-memory serial line for tests.

use super::{Driver, SerialConfig, SerialLink};
use std::{
    cell::RefCell,
    collections::VecDeque,
    io::{self, Read, Write},
    rc::Rc,
    time::Duration,
};

#[derive(Debug, Default)]
struct State {
    responses: VecDeque<Vec<u8>>,
    writes: Vec<Vec<u8>>,
    opens: usize,
    reads: usize,
    clears: usize,
    closes: usize,
    last_timeout: Option<Duration>,
    open_error: Option<io::ErrorKind>,
    fail_writes: bool,
    fail_close: bool,
}

/// Records every interaction of the links it opens.
#[derive(Debug, Default, Clone)]
pub(crate) struct MockDriver(Rc<RefCell<State>>);

impl MockDriver {
    /// Serve `response` on the next read.
    pub(crate) fn push_response(&self, response: &[u8]) {
        self.0.borrow_mut().responses.push_back(response.to_vec());
    }

    pub(crate) fn fail_open(&self, kind: io::ErrorKind) {
        self.0.borrow_mut().open_error = Some(kind);
    }

    /// Accept no bytes on write.
    pub(crate) fn fail_writes(&self) {
        self.0.borrow_mut().fail_writes = true;
    }

    pub(crate) fn fail_close(&self) {
        self.0.borrow_mut().fail_close = true;
    }

    pub(crate) fn writes(&self) -> Vec<Vec<u8>> {
        self.0.borrow().writes.clone()
    }

    pub(crate) fn opens(&self) -> usize {
        self.0.borrow().opens
    }

    pub(crate) fn reads(&self) -> usize {
        self.0.borrow().reads
    }

    pub(crate) fn clears(&self) -> usize {
        self.0.borrow().clears
    }

    pub(crate) fn closes(&self) -> usize {
        self.0.borrow().closes
    }

    pub(crate) fn last_timeout(&self) -> Option<Duration> {
        self.0.borrow().last_timeout
    }
}

impl Driver for MockDriver {
    type Link = MockLink;

    fn open(&mut self, _: &SerialConfig, timeout: Duration) -> io::Result<MockLink> {
        let mut state = self.0.borrow_mut();
        if let Some(kind) = state.open_error {
            return Err(io::Error::new(kind, "cannot open mock line"));
        }
        state.opens += 1;
        state.last_timeout = Some(timeout);
        Ok(MockLink(Rc::clone(&self.0)))
    }
}

#[derive(Debug)]
pub(crate) struct MockLink(Rc<RefCell<State>>);

impl Read for MockLink {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.0.borrow_mut();
        state.reads += 1;
        let Some(response) = state.responses.pop_front() else {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "read timed out"));
        };
        let cnt = response.len().min(buf.len());
        buf[..cnt].copy_from_slice(&response[..cnt]);
        Ok(cnt)
    }
}

impl Write for MockLink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.0.borrow_mut();
        if state.fail_writes {
            return Ok(0);
        }
        state.writes.push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SerialLink for MockLink {
    fn clear_input(&mut self) -> io::Result<()> {
        self.0.borrow_mut().clears += 1;
        Ok(())
    }

    fn close(self) -> io::Result<()> {
        let mut state = self.0.borrow_mut();
        state.closes += 1;
        if state.fail_close {
            return Err(io::Error::other("cannot close mock line"));
        }
        Ok(())
    }
}
