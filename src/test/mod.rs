
use std::io;
use std::sync::{Arc, Mutex};

use crate::diagnostics::{Diagnostics, Rotation};
use crate::node::Color;

/// A sink remembering every event it sees. Clones share the same log so a test can keep one
/// handle and give the other to a tree.
#[derive(Clone, Default)]
pub(crate) struct Recorder {
    pub(crate) rotations: Arc<Mutex<Vec<(Rotation, i32)>>>,
    pub(crate) recolors: Arc<Mutex<Vec<(i32, Color)>>>,
}

impl Recorder {
    pub(crate) fn rotations(&self) -> Vec<(Rotation, i32)> {
        self.rotations.lock().unwrap().clone()
    }

    pub(crate) fn recolors(&self) -> Vec<(i32, Color)> {
        self.recolors.lock().unwrap().clone()
    }
}

impl Diagnostics<i32> for Recorder {
    fn rotated(&mut self, rotation: Rotation, pivot: &i32) {
        self.rotations.lock().unwrap().push((rotation, *pivot));
    }

    fn recolored(&mut self, value: &i32, color: Color) {
        self.recolors.lock().unwrap().push((*value, color));
    }
}

/// Everything written to it is kept, so a test can hand one clone to a
/// `simplelog::WriteLogger` and read what was logged through the other.
#[derive(Clone, Default)]
pub(crate) struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
